use serde::Serialize;

/// Reasons a rectified grid is not accepted as a marker.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decode", rename_all = "snake_case")]
pub enum DecodeError {
    #[error("border cell ({row}, {col}) is not black")]
    BorderNotBlack { row: usize, col: usize },
    #[error("degenerate payload code {code:#06x}")]
    DegenerateCode { code: u16 },
}
