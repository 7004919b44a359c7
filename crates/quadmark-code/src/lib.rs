//! Decoding of rectified 6×6 square-marker grids.
//!
//! A marker is a black border ring around a 4×4 payload. The payload is read
//! in four 90° orientations, giving four 16-bit codes; the smallest one is the
//! marker id and its orientation tells how to reorder the image corners so
//! that corner 0 always lands on the same physical marker corner.
//!
//! This crate does not rectify anything. It expects the grid produced by
//! sampling the marker quad at the 36 cell centres.

mod codes;
mod error;
mod grid;
mod orientation;

pub use codes::{decode_marker, extract_codes, rotate_code, CodeSet, ROTATION_LUT};
pub use error::DecodeError;
pub use grid::{MarkerGrid, GRID_BINARY_THRESHOLD, GRID_CELLS, PAYLOAD_CELLS};
pub use orientation::{canonical_code, normalize_orientation, reorder_corners, Orientation};
