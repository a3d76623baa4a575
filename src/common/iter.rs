use super::metadata::{Color, Version};
use crate::builder::Matrix;

pub const VERT_TIMING_COL: i16 = 6;

// Zigzag walk over every module of the symbol
//------------------------------------------------------------------------------

/// Visits every module in placement order: column pairs from the right edge,
/// alternating upward & downward, stepping over the vertical timing column.
#[derive(Debug, Clone)]
pub struct ZigzagIter {
    r: i16,
    c: i16,
    w: i16,
    row_step: i16,
    step: usize,
}

impl ZigzagIter {
    pub fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, w, row_step: -1, step: 0 }
    }
}

impl Iterator for ZigzagIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let res = (self.r, self.c);
        if self.step & 1 == 0 {
            self.c -= 1;
        } else {
            self.r += self.row_step;
            if self.r < 0 || self.r == self.w {
                self.row_step = -self.row_step;
                self.r += self.row_step;
                self.c -= if self.c == VERT_TIMING_COL + 1 { 2 } else { 1 };
            } else {
                self.c += 1;
            }
        }
        self.step += 1;
        Some(res)
    }
}

// Module sequence
//------------------------------------------------------------------------------

/// Coordinates of every data carrying module in placement order.
pub fn module_sequence(version: Version) -> Vec<(i16, i16)> {
    let mut scratch = Matrix::new(version);
    scratch.reserve_function_areas();
    let seq = ZigzagIter::new(version)
        .filter(|&(r, c)| scratch.get(r, c) == Color::Light)
        .collect::<Vec<_>>();

    debug_assert_eq!(
        seq.len(),
        version.total_codewords() * 8 + version.remainder_bits(),
        "Data region doesn't match codeword & remainder bit count"
    );
    seq
}
