use nalgebra::Point2;

/// Arithmetic mean of the four corners.
pub fn quad_center(corners: &[Point2<f32>; 4]) -> Point2<f32> {
    let (mut sx, mut sy) = (0.0_f32, 0.0_f32);
    for c in corners {
        sx += c.x;
        sy += c.y;
    }
    Point2::new(sx / 4.0, sy / 4.0)
}

/// Unsigned shoelace area.
pub fn quad_area(corners: &[Point2<f32>; 4]) -> f32 {
    let mut twice = 0.0_f64;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        twice += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
    }
    (0.5 * twice).abs() as f32
}

/// True when all turns have the same (non-zero) orientation.
pub fn is_convex(corners: &[Point2<f32>; 4]) -> bool {
    let mut sign = 0.0_f32;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let c = corners[(i + 2) % 4];
        let cross = (b - a).perp(&(c - b));
        if cross == 0.0 || !cross.is_finite() {
            return false;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}
