use serde::{Deserialize, Serialize};

/// Cells per side of the rectified marker (payload plus one border cell each side).
pub const GRID_CELLS: usize = 6;
/// Payload cells per side.
pub const PAYLOAD_CELLS: usize = GRID_CELLS - 2;
/// Rectified intensities above this are white, the rest black.
pub const GRID_BINARY_THRESHOLD: u8 = 100;

/// Rectified 6×6 marker raster, `cells[row][col]`; `0` is black.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerGrid {
    pub cells: [[u8; GRID_CELLS]; GRID_CELLS],
}

impl MarkerGrid {
    /// Build from 36 row-major samples. `None` for any other length.
    pub fn from_samples(samples: &[u8]) -> Option<Self> {
        if samples.len() != GRID_CELLS * GRID_CELLS {
            return None;
        }
        let mut cells = [[0u8; GRID_CELLS]; GRID_CELLS];
        for (row, chunk) in cells.iter_mut().zip(samples.chunks_exact(GRID_CELLS)) {
            row.copy_from_slice(chunk);
        }
        Some(Self { cells })
    }

    /// Binary threshold: `v > threshold` becomes 255, everything else 0.
    pub fn binarize(&self, threshold: u8) -> Self {
        Self {
            cells: self
                .cells
                .map(|row| row.map(|v| if v > threshold { 255 } else { 0 })),
        }
    }

    #[inline]
    pub fn is_black(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == 0
    }

    /// First non-black cell of the outer ring, scanning `i = 0..6` over the
    /// top row, bottom row, left column and right column in turn.
    pub fn first_non_black_border(&self) -> Option<(usize, usize)> {
        let last = GRID_CELLS - 1;
        (0..GRID_CELLS)
            .flat_map(|i| [(0, i), (last, i), (i, 0), (i, last)])
            .find(|&(r, c)| !self.is_black(r, c))
    }

    /// Payload bits `bits[row][col]`, black = 1, with the column order reversed.
    pub fn payload_bits(&self) -> [[u8; PAYLOAD_CELLS]; PAYLOAD_CELLS] {
        let mut bits = [[0u8; PAYLOAD_CELLS]; PAYLOAD_CELLS];
        for (r, row) in bits.iter_mut().enumerate() {
            for (c, bit) in row.iter_mut().enumerate() {
                *bit = self.is_black(r + 1, PAYLOAD_CELLS - c) as u8;
            }
        }
        bits
    }
}
