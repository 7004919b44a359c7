use nalgebra::Vector2;

use crate::RefineParams;

/// Default stripe length relative to the stripe spacing.
pub const STRIPE_FRACTION: f32 = 0.8;
/// Shortest stripe ever sampled.
pub const MIN_STRIPE_LENGTH: usize = 5;
/// Stripe extent along the edge (pixels).
pub const STRIPE_WIDTH: usize = 3;

/// Size and orientation of the stripes sampled along one rough side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripeGeometry {
    /// Samples across the edge; odd and `>= MIN_STRIPE_LENGTH`.
    pub length: usize,
    /// Samples along the edge, always [`STRIPE_WIDTH`].
    pub width: usize,
    /// Unit vector along the rough side.
    pub along: Vector2<f32>,
    /// Unit vector across the rough side, `(along.y, -along.x)`.
    pub across: Vector2<f32>,
}

impl StripeGeometry {
    /// Derive the stripe layout from the spacing `step` between consecutive
    /// stripe centres. `None` for a zero-length (or non-finite) step.
    pub fn from_step(step: Vector2<f32>, params: &RefineParams) -> Option<Self> {
        let norm = step.norm();
        if !norm.is_finite() || norm <= f32::EPSILON {
            return None;
        }

        let raw = (params.stripe_fraction * norm) as usize;
        let length = raw.max(params.min_stripe_length.max(3)) | 1;

        let along = step / norm;
        Some(Self {
            length,
            width: STRIPE_WIDTH,
            along,
            across: Vector2::new(along.y, -along.x),
        })
    }

    /// `length / 2`: stripe rows run from `-half_length` to `+half_length`.
    #[inline]
    pub fn half_length(&self) -> usize {
        self.length / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn horizontal_step_of_seventy() {
        let g = StripeGeometry::from_step(Vector2::new(70.0, 0.0), &RefineParams::default())
            .expect("geometry");
        assert_eq!(g.length, 57);
        assert_eq!(g.width, 3);
        assert_eq!(g.along, Vector2::new(1.0, 0.0));
        assert_relative_eq!(g.across.x, 0.0);
        assert_relative_eq!(g.across.y, -1.0);
        assert_eq!(g.half_length(), 28);
    }

    #[test]
    fn short_steps_clamp_to_minimum_odd_length() {
        let p = RefineParams::default();
        for step in [Vector2::new(1.0, 0.0), Vector2::new(3.0, 4.0)] {
            let g = StripeGeometry::from_step(step, &p).expect("geometry");
            assert_eq!(g.length, 5);
        }
        // 0.8 * 10 = 8 -> odd 9
        let g = StripeGeometry::from_step(Vector2::new(0.0, 10.0), &p).expect("geometry");
        assert_eq!(g.length, 9);
        assert_relative_eq!(g.across.x, 1.0);
        assert_relative_eq!(g.across.y, 0.0);
    }

    #[test]
    fn length_is_always_odd() {
        let p = RefineParams::default();
        for i in 1..200 {
            let g = StripeGeometry::from_step(Vector2::new(i as f32 * 0.37, 1.0), &p)
                .expect("geometry");
            assert_eq!(g.length % 2, 1);
            assert!(g.length >= MIN_STRIPE_LENGTH);
        }
    }

    #[test]
    fn zero_step_is_degenerate() {
        assert!(StripeGeometry::from_step(Vector2::zeros(), &RefineParams::default()).is_none());
        assert!(
            StripeGeometry::from_step(Vector2::new(f32::NAN, 1.0), &RefineParams::default())
                .is_none()
        );
    }
}
