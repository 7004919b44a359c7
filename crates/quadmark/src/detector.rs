use log::{debug, trace};
use quadmark_code::{decode_marker, normalize_orientation};
use quadmark_core::{is_convex, quad_area, quad_center, GrayImageView};
use quadmark_refine::refine_quad;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Candidate, CandidateOutcome, CanonicalMarker, DetectionReport, DetectorParams,
    HomographyRectifier, MarkerRectifier, RejectReason,
};

/// Turns rough candidate quads into decoded, canonically ordered markers.
#[derive(Clone, Debug)]
pub struct MarkerDetector<R = HomographyRectifier> {
    pub params: DetectorParams,
    rectifier: R,
}

impl MarkerDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self::with_rectifier(params, HomographyRectifier)
    }
}

impl Default for MarkerDetector {
    fn default() -> Self {
        Self::new(DetectorParams::default())
    }
}

impl<R: MarkerRectifier> MarkerDetector<R> {
    /// Use a custom grid rectifier in place of the homography sampler.
    pub fn with_rectifier(params: DetectorParams, rectifier: R) -> Self {
        Self { params, rectifier }
    }

    /// Accepted markers in candidate order, capped at `params.max_markers`.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, img, candidates),
            fields(width = img.width, height = img.height, candidates = candidates.len())
        )
    )]
    pub fn detect(&self, img: &GrayImageView<'_>, candidates: &[Candidate]) -> Vec<CanonicalMarker> {
        self.detect_with_report(img, candidates).markers
    }

    /// Like [`Self::detect`] but also records why each candidate was rejected.
    ///
    /// Once `max_markers` is reached the remaining candidates are not
    /// processed and get no outcome.
    pub fn detect_with_report(
        &self,
        img: &GrayImageView<'_>,
        candidates: &[Candidate],
    ) -> DetectionReport {
        let mut report = DetectionReport::default();
        for (idx, candidate) in candidates.iter().enumerate() {
            if self
                .params
                .max_markers
                .is_some_and(|max| report.markers.len() >= max)
            {
                debug!("marker limit reached, skipping {} candidates", candidates.len() - idx);
                break;
            }
            let outcome = match self.process_candidate(img, candidate) {
                Ok(marker) => {
                    trace!("candidate {idx}: id {} rotation {}", marker.id, marker.rotation);
                    report.markers.push(marker);
                    CandidateOutcome::Accepted {
                        marker: report.markers.len() - 1,
                    }
                }
                Err(reason) => {
                    debug!("candidate {idx} rejected: {reason}");
                    CandidateOutcome::Rejected { reason }
                }
            };
            report.outcomes.push(outcome);
        }
        debug!(
            "{} of {} candidates decoded",
            report.markers.len(),
            candidates.len()
        );
        report
    }

    /// Refine, rectify, decode and orient a single candidate.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, img)))]
    pub fn process_candidate(
        &self,
        img: &GrayImageView<'_>,
        candidate: &Candidate,
    ) -> Result<CanonicalMarker, RejectReason> {
        let rough = candidate.to_f32();
        let area = quad_area(&rough);
        if area < self.params.min_candidate_area {
            return Err(RejectReason::TooSmall { area });
        }
        if self.params.require_convex && !is_convex(&rough) {
            return Err(RejectReason::NotConvex);
        }

        let refined = refine_quad(img, &rough, &self.params.refine);
        let lines = refined.all_lines().ok_or(RejectReason::EdgeUnresolved {
            edge: refined.first_unresolved_edge().unwrap_or_default(),
        })?;
        let corners = refined.corners().ok_or(RejectReason::CornerUnresolved {
            corner: refined.first_unresolved_corner().unwrap_or_default(),
        })?;

        let grid = self
            .rectifier
            .rectify(img, &corners)
            .ok_or(RejectReason::RectifyFailed)?
            .binarize(self.params.grid_threshold);
        let codes = decode_marker(&grid)?;
        let (orientation, corners) = normalize_orientation(&codes, &corners);

        Ok(CanonicalMarker {
            id: orientation.id,
            center: quad_center(&corners),
            corners,
            rotation: orientation.rotation,
            codes,
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;
    use quadmark_code::{DecodeError, MarkerGrid};
    use quadmark_core::GrayImage;

    /// White image with a black square covering pixels `[lo, hi)²`.
    fn dark_square(size: usize, lo: usize, hi: usize) -> GrayImage {
        let mut img = GrayImage::filled(size, size, 255);
        for y in lo..hi {
            for x in lo..hi {
                img.data[y * size + x] = 0;
            }
        }
        img
    }

    fn square_candidate(lo: i32, hi: i32) -> Candidate {
        Candidate::from([[lo, lo], [hi, lo], [hi, hi], [lo, hi]])
    }

    /// Rectifier returning a fixed grid: black border, one black payload cell.
    fn fixed_grid(_: &GrayImageView<'_>, _: &[Point2<f32>; 4]) -> Option<MarkerGrid> {
        let mut cells = [[0u8; 6]; 6];
        for row in cells.iter_mut().take(5).skip(1) {
            row[1..5].fill(255);
        }
        cells[1][1] = 0;
        Some(MarkerGrid { cells })
    }

    #[test]
    fn small_candidates_are_rejected_before_refinement() {
        let img = GrayImage::filled(50, 50, 255);
        let detector = MarkerDetector::default();
        let err = detector
            .process_candidate(&img.view(), &square_candidate(0, 10))
            .unwrap_err();
        assert_eq!(err, RejectReason::TooSmall { area: 100.0 });
    }

    #[test]
    fn non_convex_candidates_are_rejected() {
        let img = GrayImage::filled(120, 120, 255);
        let dart = Candidate::from([[0, 0], [100, 50], [0, 100], [30, 50]]);
        let detector = MarkerDetector::default();
        assert_eq!(
            detector.process_candidate(&img.view(), &dart),
            Err(RejectReason::NotConvex)
        );

        let lenient = MarkerDetector::new(DetectorParams {
            require_convex: false,
            ..DetectorParams::default()
        });
        assert_ne!(
            lenient.process_candidate(&img.view(), &dart),
            Err(RejectReason::NotConvex)
        );
    }

    #[test]
    fn flat_image_leaves_first_edge_unresolved() {
        let img = GrayImage::filled(120, 120, 200);
        let detector = MarkerDetector::default();
        assert_eq!(
            detector.process_candidate(&img.view(), &square_candidate(20, 99)),
            Err(RejectReason::EdgeUnresolved { edge: 0 })
        );
    }

    #[test]
    fn solid_square_is_a_degenerate_code() {
        let img = dark_square(100, 30, 70);
        let detector = MarkerDetector::default();
        assert_eq!(
            detector.process_candidate(&img.view(), &square_candidate(30, 69)),
            Err(RejectReason::Decode(DecodeError::DegenerateCode { code: 0xFFFF }))
        );
    }

    #[test]
    fn custom_rectifier_feeds_the_decoder() {
        let img = dark_square(100, 30, 70);
        let detector = MarkerDetector::with_rectifier(DetectorParams::default(), fixed_grid);
        let marker = detector
            .process_candidate(&img.view(), &square_candidate(30, 69))
            .expect("marker");
        assert_eq!(marker.codes.0, [8, 0x8000, 0x1000, 1]);
        assert_eq!(marker.id, 1);
        assert_eq!(marker.rotation, 3);

        // Refined corners start at the top-right; rotation 3 brings the
        // top-left corner to the front.
        let expected = Point2::new(29.5, 29.5);
        assert!((marker.corners[0] - expected).norm() < 1e-3);
        assert!((marker.center - Point2::new(49.5, 49.5)).norm() < 1e-3);
    }

    #[test]
    fn report_keeps_candidate_order_and_limit() {
        let img = dark_square(100, 30, 70);
        let detector = MarkerDetector::with_rectifier(
            DetectorParams {
                max_markers: Some(1),
                ..DetectorParams::default()
            },
            fixed_grid,
        );
        let candidates = [
            square_candidate(0, 10),
            square_candidate(30, 69),
            square_candidate(30, 69),
        ];
        let report = detector.detect_with_report(&img.view(), &candidates);
        assert_eq!(report.markers.len(), 1);
        assert_eq!(report.outcomes.len(), 2);
        assert!(matches!(
            report.outcomes[0],
            CandidateOutcome::Rejected {
                reason: RejectReason::TooSmall { .. }
            }
        ));
        assert_eq!(report.outcomes[1], CandidateOutcome::Accepted { marker: 0 });
        assert_eq!(report.rejected().map(|(i, _)| i).collect::<Vec<_>>(), vec![0]);
    }
}
