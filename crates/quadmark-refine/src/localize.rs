//! Single-stripe edge localization.

use nalgebra::Point2;
use quadmark_core::{sample_subpix_safe, GrayImageView};

use crate::StripeGeometry;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Intensities of one stripe, `length` rows of `width` samples.
///
/// Row `h` lies at offset `h - length/2` along `across`, column `w` at offset
/// `w - 1` along `along`.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStripe {
    pub width: usize,
    pub length: usize,
    pub data: Vec<u8>, // row-major, len = width * length
}

impl EdgeStripe {
    #[inline]
    pub fn row(&self, h: usize) -> &[u8] {
        &self.data[h * self.width..(h + 1) * self.width]
    }
}

/// Absolute Sobel responses of the inner stripe rows; entry `k` belongs to row `k + 1`.
pub type GradientProfile = Vec<f32>;

/// Sample the stripe centred at `center`.
pub fn sample_stripe(
    img: &GrayImageView<'_>,
    center: Point2<f32>,
    geom: &StripeGeometry,
) -> EdgeStripe {
    let half = geom.half_length() as i32;
    let half_w = (geom.width / 2) as i32;
    let mut data = Vec::with_capacity(geom.width * geom.length);
    for n in -half..=half {
        for m in -half_w..=half_w {
            let p = center + geom.along * m as f32 + geom.across * n as f32;
            data.push(sample_subpix_safe(img, p));
        }
    }
    EdgeStripe {
        width: geom.width,
        length: geom.length,
        data,
    }
}

#[inline]
fn weighted_row(row: &[u8]) -> f32 {
    // 1-2-1 smoothing across the stripe width
    let mid = row.len() / 2;
    row.iter()
        .enumerate()
        .map(|(i, &v)| if i == mid { 2.0 * v as f32 } else { v as f32 })
        .sum()
}

/// Vertical Sobel response (`-1,-2,-1` above, `1,2,1` below) for every inner row.
pub fn gradient_profile(stripe: &EdgeStripe) -> GradientProfile {
    if stripe.length < 3 {
        return Vec::new();
    }
    (1..stripe.length - 1)
        .map(|h| (weighted_row(stripe.row(h + 1)) - weighted_row(stripe.row(h - 1))).abs())
        .collect()
}

/// Index of the strongest response; the first one wins on ties.
pub fn peak_index(profile: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in profile.iter().enumerate() {
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Vertex of the parabola through `(-1, left)`, `(0, center)`, `(1, right)`.
///
/// Neighbours beyond the profile ends count as zero. `None` when the three
/// samples are collinear, which for a peak means a flat profile.
pub fn parabolic_peak_offset(profile: &[f32], index: usize) -> Option<f32> {
    let center = *profile.get(index)?;
    let left = if index > 0 { profile[index - 1] } else { 0.0 };
    let right = profile.get(index + 1).copied().unwrap_or(0.0);

    let denom = 4.0 * center - 2.0 * left - 2.0 * right;
    if denom == 0.0 {
        return None;
    }
    let offset = (right - left) / denom;
    offset.is_finite().then_some(offset)
}

/// Locate the edge crossing the stripe centred at `center`.
///
/// Returns the sub-pixel edge point in image coordinates, or `None` when the
/// gradient profile is flat around its maximum.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(img, geom), fields(length = geom.length))
)]
pub fn localize_edge(
    img: &GrayImageView<'_>,
    center: Point2<f32>,
    geom: &StripeGeometry,
) -> Option<Point2<f32>> {
    let stripe = sample_stripe(img, center, geom);
    let profile = gradient_profile(&stripe);
    let k = peak_index(&profile)?;
    let Some(offset) = parabolic_peak_offset(&profile, k) else {
        log::trace!("flat gradient profile at ({:.2}, {:.2})", center.x, center.y);
        return None;
    };

    // Profile entry k is the response of stripe row k + 1.
    let shift = (k + 1) as f32 - geom.half_length() as f32 + offset;
    Some(center + geom.across * shift)
}
