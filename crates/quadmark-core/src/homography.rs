use crate::{sample_bilinear_u8, GrayImageView};
use nalgebra::{Matrix3, Point2, Vector3};

const DEGENERATE_DET: f64 = 1e-12;

/// Projective map between two planes, `dst ~ H * src`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    #[inline]
    pub fn apply(&self, p: Point2<f32>) -> Point2<f32> {
        let v = self.h * Vector3::new(p.x as f64, p.y as f64, 1.0);
        let w = v[2];
        Point2::new((v[0] / w) as f32, (v[1] / w) as f32)
    }
}

/// Projective map from the unit square `(0,0) (1,0) (1,1) (0,1)` onto `quad`.
fn unit_square_to(quad: &[Point2<f32>; 4]) -> Option<Matrix3<f64>> {
    let [p0, p1, p2, p3] = quad.map(|p| (p.x as f64, p.y as f64));
    let sx = p0.0 - p1.0 + p2.0 - p3.0;
    let sy = p0.1 - p1.1 + p2.1 - p3.1;
    let (dx1, dy1) = (p1.0 - p2.0, p1.1 - p2.1);
    let (dx2, dy2) = (p3.0 - p2.0, p3.1 - p2.1);

    let den = dx1 * dy2 - dx2 * dy1;
    if den.abs() < DEGENERATE_DET {
        return None;
    }
    // Zero for parallelograms, which leaves an affine map.
    let g = (sx * dy2 - dx2 * sy) / den;
    let h = (dx1 * sy - sx * dy1) / den;

    Some(Matrix3::new(
        p1.0 - p0.0 + g * p1.0, p3.0 - p0.0 + h * p3.0, p0.0, //
        p1.1 - p0.1 + g * p1.1, p3.1 - p0.1 + h * p3.1, p0.1, //
        g, h, 1.0,
    ))
}

/// Compute H such that `dst ~ H * src` from 4 point correspondences.
///
/// Both quads are mapped from the unit square and the two maps composed.
/// Corner order must be consistent between `src` and `dst`. Returns `None`
/// for degenerate configurations (three collinear points, repeated points).
pub fn homography_from_4pt(src: &[Point2<f32>; 4], dst: &[Point2<f32>; 4]) -> Option<Homography> {
    let square_to_src = unit_square_to(src)?;
    let square_to_dst = unit_square_to(dst)?;
    let h = square_to_dst * square_to_src.try_inverse()?;

    let s = h[(2, 2)];
    if !s.is_finite() || s.abs() < DEGENERATE_DET || h.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(Homography::new(h / s))
}

/// Sample a `cells × cells` grid whose cell `(cx, cy)` is centred on the
/// integer point `(cx, cy)` of the source plane of `h_img_from_grid`.
///
/// Returns row-major intensities (`cy * cells + cx`).
pub fn sample_grid_gray(
    src: &GrayImageView<'_>,
    h_img_from_grid: &Homography,
    cells: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(cells * cells);
    for cy in 0..cells {
        for cx in 0..cells {
            let p = h_img_from_grid.apply(Point2::new(cx as f32, cy as f32));
            out.push(sample_bilinear_u8(src, p.x, p.y));
        }
    }
    out
}
