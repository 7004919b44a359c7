//! Payload codes for the four 90° orientations.

use serde::{Deserialize, Serialize};

use crate::{DecodeError, MarkerGrid, PAYLOAD_CELLS};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// `ROTATION_LUT[r][i]` is the flat payload index (`row * 4 + col`) that
/// supplies bit `i` of the rotation-`r` code.
///
/// - `r = 0`: identity, `bits[row][col]`
/// - `r = 1`: `bits[3 - col][row]`
/// - `r = 2`: `bits[3 - row][3 - col]`
/// - `r = 3`: `bits[col][3 - row]`
pub const ROTATION_LUT: [[u8; 16]; 4] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [12, 8, 4, 0, 13, 9, 5, 1, 14, 10, 6, 2, 15, 11, 7, 3],
    [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
    [3, 7, 11, 15, 2, 6, 10, 14, 1, 5, 9, 13, 0, 4, 8, 12],
];

/// Codes of one payload read in the four orientations; index = rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeSet(pub [u16; 4]);

impl CodeSet {
    #[inline]
    pub fn get(&self, rotation: usize) -> u16 {
        self.0[rotation & 3]
    }

    /// All-white (`0`) and all-black (`0xFFFF`) payloads carry no identity.
    pub fn is_degenerate(&self) -> bool {
        matches!(self.0[0], 0 | 0xFFFF)
    }
}

/// Re-read a rotation-0 code in orientation `rotation` (taken mod 4).
pub fn rotate_code(code: u16, rotation: usize) -> u16 {
    let lut = &ROTATION_LUT[rotation & 3];
    let mut out = 0u16;
    for (i, &src) in lut.iter().enumerate() {
        out |= ((code >> src) & 1) << i;
    }
    out
}

/// Build the four orientation codes from payload bits (black = 1).
pub fn extract_codes(bits: &[[u8; PAYLOAD_CELLS]; PAYLOAD_CELLS]) -> CodeSet {
    let flat: [u8; 16] = std::array::from_fn(|i| bits[i / PAYLOAD_CELLS][i % PAYLOAD_CELLS] & 1);
    CodeSet(ROTATION_LUT.map(|lut| {
        lut.iter()
            .enumerate()
            .fold(0u16, |acc, (i, &src)| acc | ((flat[src as usize] as u16) << i))
    }))
}

/// Validate the border of a binarized grid and decode its payload.
#[cfg_attr(feature = "tracing", instrument(level = "trace", skip(grid)))]
pub fn decode_marker(grid: &MarkerGrid) -> Result<CodeSet, DecodeError> {
    if let Some((row, col)) = grid.first_non_black_border() {
        return Err(DecodeError::BorderNotBlack { row, col });
    }
    let codes = extract_codes(&grid.payload_bits());
    if codes.is_degenerate() {
        return Err(DecodeError::DegenerateCode { code: codes.0[0] });
    }
    log::trace!("decoded codes {:?}", codes.0);
    Ok(codes)
}
