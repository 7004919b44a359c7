use quadmark_core::PARALLEL_EPS;
use serde::{Deserialize, Serialize};

use crate::stripe::{MIN_STRIPE_LENGTH, STRIPE_FRACTION};

/// Number of equal segments each rough side is split into.
pub const EDGE_SUBDIVISIONS: usize = 7;

/// Stripes per side: one at every interior subdivision point.
pub const STRIPES_PER_EDGE: usize = EDGE_SUBDIVISIONS - 1;

/// Edge refinement parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineParams {
    /// Stripe length as a fraction of the spacing between stripe centres.
    pub stripe_fraction: f32,
    /// Lower bound for the stripe length (pixels); the length is always odd.
    pub min_stripe_length: usize,
    /// Minimum `|sin|` between adjacent refined lines for a corner to resolve.
    pub parallel_eps: f64,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            stripe_fraction: STRIPE_FRACTION,
            min_stripe_length: MIN_STRIPE_LENGTH,
            parallel_eps: PARALLEL_EPS,
        }
    }
}
