//! Core types and utilities for square fiducial marker detection.
//!
//! This crate is purely geometric: grayscale image views, the two bilinear
//! samplers used by the refinement and rectification stages, 4-point
//! homographies, and the 2-D line algebra (total-least-squares fit and
//! intersection) that turns refined edge samples into corners.

mod homography;
mod image;
mod line;
mod logger;
mod quad;

pub use homography::{homography_from_4pt, sample_grid_gray, Homography};
pub use image::{
    sample_bilinear, sample_bilinear_u8, sample_subpix_safe, GrayImage, GrayImageView, ImageError,
    NEUTRAL_SAMPLE, SUBPIXEL_SCALE,
};
pub use line::{fit_line, intersect_lines, EdgeLine, PARALLEL_EPS};
pub use quad::{is_convex, quad_area, quad_center};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
