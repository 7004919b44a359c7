//! Glue for the `image` crate.

use crate::core::GrayImageView;
use crate::{Candidate, CanonicalMarker, MarkerDetector, MarkerRectifier};

/// Borrow an `image::GrayImage` as a [`GrayImageView`].
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Run `detector` on an `image::GrayImage`.
pub fn detect_image<R: MarkerRectifier>(
    detector: &MarkerDetector<R>,
    img: &::image::GrayImage,
    candidates: &[Candidate],
) -> Vec<CanonicalMarker> {
    detector.detect(&gray_view(img), candidates)
}
