use nalgebra::Point2;
use quadmark_core::{intersect_lines, EdgeLine};
use serde::{Deserialize, Serialize};

use crate::RefinedEdge;

/// Corner `i` is the intersection of lines `i` and `(i + 1) % 4`.
///
/// A corner is `None` when either line is missing or the pair is parallel
/// within `eps`.
pub fn intersect_adjacent(lines: &[Option<EdgeLine>; 4], eps: f64) -> [Option<Point2<f32>>; 4] {
    std::array::from_fn(|i| match (&lines[i], &lines[(i + 1) % 4]) {
        (Some(a), Some(b)) => intersect_lines(a, b, eps),
        _ => None,
    })
}

/// Refined sides and corners of one candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefinedQuad {
    pub edges: [RefinedEdge; 4],
    pub corners: [Option<Point2<f32>>; 4],
}

impl RefinedQuad {
    pub fn lines(&self) -> [Option<EdgeLine>; 4] {
        self.edges.each_ref().map(|e| e.line)
    }

    /// All four corners, or `None` if any is unresolved.
    pub fn corners(&self) -> Option<[Point2<f32>; 4]> {
        let [a, b, c, d] = self.corners;
        Some([a?, b?, c?, d?])
    }

    /// All four side lines, or `None` if any side is unresolved.
    pub fn all_lines(&self) -> Option<[EdgeLine; 4]> {
        let [a, b, c, d] = self.lines();
        Some([a?, b?, c?, d?])
    }

    pub fn first_unresolved_edge(&self) -> Option<usize> {
        self.edges.iter().position(|e| e.line.is_none())
    }

    pub fn first_unresolved_corner(&self) -> Option<usize> {
        self.corners.iter().position(Option::is_none)
    }
}
