use std::ops::Deref;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{
    error::{QRError, QRResult},
    iter::module_sequence,
    metadata::{Color, Config},
};
use crate::builder::{assemble_candidate, Matrix};

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskingPattern);
        }
        Ok(Self(pattern))
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}

#[cfg(test)]
mod mask_pattern_tests {
    use test_case::test_case;

    use super::MaskPattern;
    use crate::common::error::QRError;

    #[test]
    fn test_invalid_mask() {
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
        assert_eq!(MaskPattern::all().count(), 8);
    }

    #[test_case(0, 0, 0, true)]
    #[test_case(0, 1, 2, false)]
    #[test_case(1, 3, 5, false)]
    #[test_case(2, 7, 9, true)]
    #[test_case(3, 1, 5, true)]
    #[test_case(4, 2, 3, true)]
    #[test_case(4, 2, 6, false)]
    #[test_case(5, 2, 3, true)]
    #[test_case(5, 1, 1, false)]
    #[test_case(6, 1, 2, true)]
    #[test_case(6, 1, 3, false)]
    #[test_case(7, 1, 2, false)]
    #[test_case(7, 0, 0, true)]
    fn test_mask_function(mask: u8, r: i16, c: i16, exp: bool) {
        let f = MaskPattern::new(mask).unwrap().mask_function();
        assert_eq!(f(r, c), exp);
    }
}

// Penalty score
//------------------------------------------------------------------------------

pub fn penalty_score(m: &Matrix) -> u32 {
    let adj_pen = compute_adjacent_penalty(m);
    let blk_pen = compute_block_penalty(m);
    let fp_pen_h = compute_finder_pattern_penalty(m, true);
    let fp_pen_v = compute_finder_pattern_penalty(m, false);
    let bal_pen = compute_balance_penalty(m);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Rule 1: 3 points for a run of 5, plus 1 for every further module in the run
fn compute_line_penalty(line: impl Iterator<Item = Color>) -> u32 {
    let mut pen = 0;
    let mut last = None;
    let mut run = 0;
    for clr in line {
        if last != Some(clr) {
            last = Some(clr);
            run = 1;
            continue;
        }
        run += 1;
        if run == 5 {
            pen += 3;
        } else if run > 5 {
            pen += 1;
        }
    }
    pen
}

fn compute_adjacent_penalty(m: &Matrix) -> u32 {
    let w = m.width() as i16;
    (0..w)
        .map(|i| {
            compute_line_penalty((0..w).map(|j| m.get(i, j)))
                + compute_line_penalty((0..w).map(|j| m.get(j, i)))
        })
        .sum()
}

// Rule 2: 3 points for every uniform 2x2 window
fn compute_block_penalty(m: &Matrix) -> u32 {
    let mut pen = 0;
    let w = m.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = m.get(r, c);
            if clr == m.get(r + 1, c) && clr == m.get(r, c + 1) && clr == m.get(r + 1, c + 1) {
                pen += 3;
            }
        }
    }
    pen
}

// Rule 3: 40 points for every 1:1:3:1:1 finder look-alike followed or preceded
// by 4 light modules
static FINDER_LIKE: [Color; 11] = [
    Color::Dark,
    Color::Light,
    Color::Dark,
    Color::Dark,
    Color::Dark,
    Color::Light,
    Color::Dark,
    Color::Light,
    Color::Light,
    Color::Light,
    Color::Light,
];

fn compute_finder_pattern_penalty(m: &Matrix, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = m.width() as i16;
    let len = FINDER_LIKE.len() as i16;
    let get = |i, j| if is_hor { m.get(i, j) } else { m.get(j, i) };
    for i in 0..w {
        for j in 0..=w - len {
            let window = (j..j + len).map(|k| get(i, k));
            if window.clone().eq(FINDER_LIKE.iter().copied())
                || window.eq(FINDER_LIKE.iter().rev().copied())
            {
                pen += 40;
            }
        }
    }
    pen
}

// Rule 4: 10 points for every 5% the dark ratio deviates from 50%, with the
// deviation truncated toward zero
fn compute_balance_penalty(m: &Matrix) -> u32 {
    let dark = m.count_dark_modules() as i64;
    let w = m.width() as i64;
    let total = w * w;
    let deviation = (dark * 100 - total * 50) / (total * 5);
    deviation.unsigned_abs() as u32 * 10
}

#[cfg(test)]
mod penalty_tests {
    use super::{
        compute_adjacent_penalty, compute_balance_penalty, compute_block_penalty,
        compute_finder_pattern_penalty, compute_line_penalty, penalty_score,
    };
    use crate::builder::Matrix;
    use crate::common::metadata::{Color, Version};

    fn line(s: &str) -> impl Iterator<Item = Color> + '_ {
        s.chars().map(|ch| Color::from(ch == '#'))
    }

    #[test]
    fn test_line_penalty() {
        assert_eq!(compute_line_penalty(line("#.#.#.#")), 0);
        assert_eq!(compute_line_penalty(line("....#")), 0);
        assert_eq!(compute_line_penalty(line(".....#")), 3);
        assert_eq!(compute_line_penalty(line("#######")), 5);
        assert_eq!(compute_line_penalty(line("#####.....")), 6);
    }

    #[test]
    fn test_blank_matrix_penalty() {
        let m = Matrix::new(Version::new(2).unwrap());
        // 50 lines of 25 light modules: 3 + 20 each
        assert_eq!(compute_adjacent_penalty(&m), 1150);
        assert_eq!(compute_block_penalty(&m), 24 * 24 * 3);
        assert_eq!(compute_finder_pattern_penalty(&m, true), 0);
        assert_eq!(compute_finder_pattern_penalty(&m, false), 0);
        assert_eq!(compute_balance_penalty(&m), 100);
        assert_eq!(penalty_score(&m), 2978);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let mut m = Matrix::new(Version::new(1).unwrap());
        for (j, clr) in line("#.###.#....").enumerate() {
            m.set(3, j as i16 + 2, clr);
        }
        for (i, clr) in line("....#.###.#").enumerate() {
            m.set(i as i16 + 9, 17, clr);
        }
        assert_eq!(compute_finder_pattern_penalty(&m, true), 40);
        assert_eq!(compute_finder_pattern_penalty(&m, false), 40);
    }

    #[test]
    fn test_balance_penalty() {
        let mut m = Matrix::new(Version::new(1).unwrap());
        m.fill_area(0, 0, 21, 21, Color::Dark);
        assert_eq!(compute_balance_penalty(&m), 100);

        // 210 of 441 dark is 47.6%, which truncates to no deviation
        let mut m = Matrix::new(Version::new(1).unwrap());
        m.fill_area(0, 0, 21, 10, Color::Dark);
        assert_eq!(compute_balance_penalty(&m), 0);

        // 126 of 441 dark is 28.6%, four whole 5% steps below half
        let mut m = Matrix::new(Version::new(1).unwrap());
        m.fill_area(0, 0, 21, 6, Color::Dark);
        assert_eq!(compute_balance_penalty(&m), 40);
    }
}

// Optimal mask
//------------------------------------------------------------------------------

/// Builds all eight candidates & returns the one with the lowest penalty. Ties
/// go to the lowest mask index.
pub fn apply_best_mask(config: &Config, codewords: &[u8]) -> (Matrix, MaskPattern) {
    let seq = module_sequence(config.version());
    let (_, mask, matrix) = MaskPattern::all()
        .map(|mask| score_candidate(config, &seq, codewords, mask))
        .min_by_key(|(score, mask, _)| (*score, *mask))
        .expect("Mask candidates are never empty");
    (matrix, mask)
}

#[cfg(feature = "parallel")]
pub fn apply_best_mask_par(config: &Config, codewords: &[u8]) -> (Matrix, MaskPattern) {
    let seq = module_sequence(config.version());
    let (_, mask, matrix) = (0..8u8)
        .into_par_iter()
        .map(|m| score_candidate(config, &seq, codewords, MaskPattern(m)))
        .min_by_key(|(score, mask, _)| (*score, *mask))
        .expect("Mask candidates are never empty");
    (matrix, mask)
}

fn score_candidate(
    config: &Config,
    seq: &[(i16, i16)],
    codewords: &[u8],
    mask: MaskPattern,
) -> (u32, MaskPattern, Matrix) {
    let matrix = assemble_candidate(config, seq, codewords, mask);
    (penalty_score(&matrix), mask, matrix)
}
