use nalgebra::Point2;
use quadmark_core::{fit_line, EdgeLine, GrayImageView};
use serde::{Deserialize, Serialize};

use crate::corners::{intersect_adjacent, RefinedQuad};
use crate::localize::localize_edge;
use crate::{RefineParams, StripeGeometry, EDGE_SUBDIVISIONS, STRIPES_PER_EDGE};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Refinement result for one side of the quad.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefinedEdge {
    /// Sub-pixel edge point per stripe, `None` where the stripe was degenerate.
    pub points: [Option<Point2<f32>>; STRIPES_PER_EDGE],
    /// Line fitted through the valid points.
    pub line: Option<EdgeLine>,
}

impl RefinedEdge {
    fn unresolved() -> Self {
        Self {
            points: [None; STRIPES_PER_EDGE],
            line: None,
        }
    }

    pub fn valid_points(&self) -> impl Iterator<Item = Point2<f32>> + '_ {
        self.points.iter().flatten().copied()
    }

    pub fn valid_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }
}

/// Refine the rough side `from → to`.
pub fn refine_edge(
    img: &GrayImageView<'_>,
    from: Point2<f32>,
    to: Point2<f32>,
    params: &RefineParams,
) -> RefinedEdge {
    let step = (to - from) / EDGE_SUBDIVISIONS as f32;
    let Some(geom) = StripeGeometry::from_step(step, params) else {
        log::debug!(
            "zero-length side ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            from.x,
            from.y,
            to.x,
            to.y
        );
        return RefinedEdge::unresolved();
    };

    let mut points = [None; STRIPES_PER_EDGE];
    for (j, slot) in points.iter_mut().enumerate() {
        let center = from + step * (j + 1) as f32;
        *slot = localize_edge(img, center, &geom);
    }

    let valid: Vec<Point2<f32>> = points.iter().flatten().copied().collect();
    let line = fit_line(&valid, geom.along);
    if valid.len() < STRIPES_PER_EDGE {
        log::trace!("{} of {} stripes localized", valid.len(), STRIPES_PER_EDGE);
    }

    RefinedEdge { points, line }
}

/// Refine the four sides `quad[i] → quad[(i + 1) % 4]`.
pub fn refine_edges(
    img: &GrayImageView<'_>,
    quad: &[Point2<f32>; 4],
    params: &RefineParams,
) -> [RefinedEdge; 4] {
    std::array::from_fn(|i| refine_edge(img, quad[i], quad[(i + 1) % 4], params))
}

/// Refine all sides and intersect adjacent lines into corners.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img, quad, params), fields(width = img.width, height = img.height))
)]
pub fn refine_quad(
    img: &GrayImageView<'_>,
    quad: &[Point2<f32>; 4],
    params: &RefineParams,
) -> RefinedQuad {
    let edges = refine_edges(img, quad, params);
    let lines = edges.each_ref().map(|e| e.line);
    let corners = intersect_adjacent(&lines, params.parallel_eps);
    RefinedQuad { edges, corners }
}
