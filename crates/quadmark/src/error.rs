use quadmark_code::DecodeError;
use serde::Serialize;

/// Why a candidate quadrilateral did not produce a marker.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("candidate area {area:.1} px² below minimum")]
    TooSmall { area: f32 },
    #[error("candidate is not convex")]
    NotConvex,
    #[error("no edge points found on side {edge}")]
    EdgeUnresolved { edge: usize },
    #[error("sides meeting at corner {corner} are parallel")]
    CornerUnresolved { corner: usize },
    #[error("refined quad cannot be rectified")]
    RectifyFailed,
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
