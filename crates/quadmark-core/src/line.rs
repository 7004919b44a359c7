//! 2-D lines in direction/point form: total-least-squares fit and intersection.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Lines whose cross product `|d0 × d1|` falls below this are treated as parallel.
pub const PARALLEL_EPS: f64 = 1e-3;

const DEGENERATE_SPREAD: f64 = 1e-12;

/// Infinite line through `point` along the unit vector `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeLine {
    pub direction: Vector2<f32>,
    pub point: Point2<f32>,
}

impl EdgeLine {
    /// Build a line, normalizing `direction`. `None` for a zero direction.
    pub fn new(direction: Vector2<f32>, point: Point2<f32>) -> Option<Self> {
        let norm = direction.norm();
        if !norm.is_finite() || norm <= f32::EPSILON {
            return None;
        }
        Some(Self {
            direction: direction / norm,
            point,
        })
    }

    /// Parameter vector `[vx, vy, x0, y0]`.
    pub fn params(&self) -> [f32; 4] {
        [
            self.direction.x,
            self.direction.y,
            self.point.x,
            self.point.y,
        ]
    }

    /// Unsigned perpendicular distance from `p` to the line.
    pub fn distance_to(&self, p: Point2<f32>) -> f32 {
        let d = p - self.point;
        (d.x * self.direction.y - d.y * self.direction.x).abs()
    }
}

/// Fit a line through `points`, minimizing the sum of squared perpendicular
/// distances (principal axis of the scatter matrix through the centroid).
///
/// `along` orients the result: the fitted direction is flipped to agree with
/// it, and it is used verbatim when the points carry no direction (a single
/// point, or all points coincide). Returns `None` without points.
pub fn fit_line(points: &[Point2<f32>], along: Vector2<f32>) -> Option<EdgeLine> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let (mut mx, mut my) = (0.0_f64, 0.0_f64);
    for p in points {
        mx += p.x as f64;
        my += p.y as f64;
    }
    mx /= n;
    my /= n;

    let (mut sxx, mut sxy, mut syy) = (0.0_f64, 0.0_f64, 0.0_f64);
    for p in points {
        let dx = p.x as f64 - mx;
        let dy = p.y as f64 - my;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let centroid = Point2::new(mx as f32, my as f32);
    if sxx + syy <= DEGENERATE_SPREAD {
        return EdgeLine::new(along, centroid);
    }

    let theta = 0.5 * (2.0 * sxy).atan2(sxx - syy);
    let mut direction = Vector2::new(theta.cos() as f32, theta.sin() as f32);
    if direction.dot(&along) < 0.0 {
        direction = -direction;
    }
    EdgeLine::new(direction, centroid)
}

/// Intersect two lines. `None` when `|u0·v1 − v0·u1| < eps`.
pub fn intersect_lines(l0: &EdgeLine, l1: &EdgeLine, eps: f64) -> Option<Point2<f32>> {
    let (u0, v0) = (l0.direction.x as f64, l0.direction.y as f64);
    let (x0, y0) = (l0.point.x as f64, l0.point.y as f64);
    let (u1, v1) = (l1.direction.x as f64, l1.direction.y as f64);
    let (x1, y1) = (l1.point.x as f64, l1.point.y as f64);

    let c = v1 * u0 - v0 * u1;
    if !c.is_finite() || c.abs() < eps {
        return None;
    }
    let a = x1 * u0 * v1 - y1 * u0 * u1 - x0 * u1 * v0 + y0 * u0 * u1;
    let b = -x0 * v0 * v1 + y0 * u0 * v1 + x1 * v0 * v1 - y1 * v0 * u1;
    Some(Point2::new((a / c) as f32, (b / c) as f32))
}
