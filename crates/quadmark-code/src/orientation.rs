use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::CodeSet;

/// Canonical identity of a decoded marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orientation {
    /// Smallest of the four orientation codes.
    pub id: u16,
    /// Orientation index (`0..4`) that produced `id`.
    pub rotation: usize,
}

/// Minimum code and its rotation index; the lowest index wins on ties.
pub fn canonical_code(codes: &CodeSet) -> Orientation {
    let mut best = Orientation {
        id: codes.0[0],
        rotation: 0,
    };
    for (rotation, &code) in codes.0.iter().enumerate().skip(1) {
        if code < best.id {
            best = Orientation { id: code, rotation };
        }
    }
    best
}

/// Rotate the corner order by `rotation` positions: `out[k] = corners[(k + rotation) % 4]`.
///
/// Corner `k` of the quad is the one mapped onto rectified grid corner `k`
/// (top-left, top-right, bottom-right, bottom-left). Starting the same
/// physical marker one corner later lowers the winning rotation by one, so
/// this shift puts the same physical corner first regardless of where the
/// quad started.
pub fn reorder_corners(corners: &[Point2<f32>; 4], rotation: usize) -> [Point2<f32>; 4] {
    let mut out = *corners;
    out.rotate_left(rotation & 3);
    out
}

/// Pick the canonical code and reorder `corners` to match it.
pub fn normalize_orientation(
    codes: &CodeSet,
    corners: &[Point2<f32>; 4],
) -> (Orientation, [Point2<f32>; 4]) {
    let orientation = canonical_code(codes);
    (orientation, reorder_corners(corners, orientation.rotation))
}
