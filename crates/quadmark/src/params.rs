use quadmark_code::GRID_BINARY_THRESHOLD;
use quadmark_refine::RefineParams;
use serde::{Deserialize, Serialize};

/// Smallest candidate area (px²) worth refining.
pub const MIN_CANDIDATE_AREA: f32 = 1000.0;

/// Configuration for [`crate::MarkerDetector`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Edge and corner refinement settings.
    pub refine: RefineParams,
    /// Rectified cells brighter than this are white.
    pub grid_threshold: u8,
    /// Candidates with a smaller shoelace area are rejected.
    pub min_candidate_area: f32,
    /// Reject non-convex candidates.
    pub require_convex: bool,
    /// Stop after this many accepted markers.
    pub max_markers: Option<usize>,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            refine: RefineParams::default(),
            grid_threshold: GRID_BINARY_THRESHOLD,
            min_candidate_area: MIN_CANDIDATE_AREA,
            require_convex: true,
            max_markers: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_overrides_merge_with_defaults() {
        let p: DetectorParams = serde_json::from_str(
            r#"{ "grid_threshold": 90, "max_markers": 4, "refine": { "min_stripe_length": 7 } }"#,
        )
        .expect("parse");
        assert_eq!(p.grid_threshold, 90);
        assert_eq!(p.max_markers, Some(4));
        assert_eq!(p.refine.min_stripe_length, 7);
        assert_eq!(p.refine.stripe_fraction, RefineParams::default().stripe_fraction);
        assert_eq!(p.min_candidate_area, MIN_CANDIDATE_AREA);
        assert!(p.require_convex);
    }
}
