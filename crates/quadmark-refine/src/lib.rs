//! Sub-pixel refinement of a rough marker quadrilateral.
//!
//! Each side of the candidate quad is split into [`EDGE_SUBDIVISIONS`] equal
//! segments. At each of the interior subdivision points a thin stripe is
//! sampled across the side, a vertical Sobel response is computed along it,
//! and the strongest response is refined with a three-point parabola. The
//! resulting edge points are fitted with a total-least-squares line per side,
//! and adjacent lines are intersected into the refined corners.
//!
//! ```
//! use nalgebra::Point2;
//! use quadmark_core::GrayImage;
//! use quadmark_refine::{refine_quad, RefineParams};
//!
//! let img = GrayImage::filled(64, 64, 255);
//! let quad = [
//!     Point2::new(10.0, 10.0),
//!     Point2::new(50.0, 10.0),
//!     Point2::new(50.0, 50.0),
//!     Point2::new(10.0, 50.0),
//! ];
//! let refined = refine_quad(&img.view(), &quad, &RefineParams::default());
//! // A flat image carries no edges, so nothing can be refined.
//! assert!(refined.corners().is_none());
//! ```

mod corners;
mod localize;
mod params;
mod pipeline;
mod stripe;

pub use corners::{intersect_adjacent, RefinedQuad};
pub use localize::{
    gradient_profile, localize_edge, parabolic_peak_offset, peak_index, sample_stripe, EdgeStripe,
    GradientProfile,
};
pub use params::{RefineParams, EDGE_SUBDIVISIONS, STRIPES_PER_EDGE};
pub use pipeline::{refine_edge, refine_edges, refine_quad, RefinedEdge};
pub use stripe::{StripeGeometry, MIN_STRIPE_LENGTH, STRIPE_FRACTION, STRIPE_WIDTH};
