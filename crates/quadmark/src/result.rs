use nalgebra::Point2;
use quadmark_code::CodeSet;
use quadmark_core::EdgeLine;
use serde::{Deserialize, Serialize};

use crate::RejectReason;

/// Rough marker quadrilateral from an upstream contour stage.
///
/// Corners should wind consistently (clockwise in image coordinates with
/// `y` pointing down); the opposite winding reads the payload mirrored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub corners: [Point2<i32>; 4],
}

impl Candidate {
    pub fn new(corners: [Point2<i32>; 4]) -> Self {
        Self { corners }
    }

    pub fn to_f32(&self) -> [Point2<f32>; 4] {
        self.corners.map(|p| Point2::new(p.x as f32, p.y as f32))
    }
}

impl From<[[i32; 2]; 4]> for Candidate {
    fn from(corners: [[i32; 2]; 4]) -> Self {
        Self::new(corners.map(|[x, y]| Point2::new(x, y)))
    }
}

/// A decoded marker with corners in canonical order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMarker {
    /// Smallest of the four orientation codes.
    pub id: u16,
    /// Sub-pixel corners; corner 0 is the same physical marker corner
    /// whatever vertex the candidate started from.
    pub corners: [Point2<f32>; 4],
    /// Mean of the four corners.
    pub center: Point2<f32>,
    /// Orientation index that produced `id`.
    pub rotation: usize,
    /// Codes as read from the candidate's own corner order.
    pub codes: CodeSet,
    /// Refined side lines; side `i` runs from candidate corner `i` to `i + 1`.
    pub lines: [EdgeLine; 4],
}

/// What happened to one candidate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CandidateOutcome {
    /// Accepted; `marker` indexes [`DetectionReport::markers`].
    Accepted { marker: usize },
    Rejected { reason: RejectReason },
}

/// Markers plus one outcome per processed candidate, in input order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DetectionReport {
    pub markers: Vec<CanonicalMarker>,
    pub outcomes: Vec<CandidateOutcome>,
}

impl DetectionReport {
    pub fn rejected(&self) -> impl Iterator<Item = (usize, &RejectReason)> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| match o {
                CandidateOutcome::Rejected { reason } => Some((i, reason)),
                CandidateOutcome::Accepted { .. } => None,
            })
    }
}
