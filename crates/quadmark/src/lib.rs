//! Square fiducial marker detection.
//!
//! The detector takes rough quadrilaterals from an upstream candidate
//! generator and, for each one:
//! 1. refines the four sides to sub-pixel lines and intersects them into corners,
//! 2. rectifies the marker onto a 6×6 grid and checks the black border,
//! 3. decodes the 4×4 payload in all four orientations and keeps the smallest
//!    code as the marker id,
//! 4. reorders the corners to that orientation and computes the centre.
//!
//! ## Quickstart
//!
//! ```
//! use quadmark::{Candidate, DetectorParams, MarkerDetector};
//! use quadmark::core::GrayImage;
//!
//! let img = GrayImage::filled(200, 200, 255);
//! let candidates = vec![Candidate::from([[40, 40], [159, 40], [159, 159], [40, 159]])];
//!
//! let detector = MarkerDetector::new(DetectorParams::default());
//! let markers = detector.detect(&img.view(), &candidates);
//! assert!(markers.is_empty());
//! ```
//!
//! ## API map
//! - `quadmark::core`: images, samplers, homographies, line geometry, logging.
//! - `quadmark::refine`: stripe-based sub-pixel edge and corner refinement.
//! - `quadmark::code`: 6×6 grid validation and orientation codes.

pub use quadmark_code as code;
pub use quadmark_core as core;
pub use quadmark_refine as refine;

mod detector;
mod error;
mod params;
mod rectify;
mod result;

#[cfg(feature = "image")]
pub mod io;

pub use detector::MarkerDetector;
pub use error::RejectReason;
pub use params::{DetectorParams, MIN_CANDIDATE_AREA};
pub use rectify::{HomographyRectifier, MarkerRectifier, GRID_DESTINATION};
pub use result::{Candidate, CandidateOutcome, CanonicalMarker, DetectionReport};
