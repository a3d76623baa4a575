use crate::common::{
    error::QRResult,
    mask::MaskPattern,
    metadata::{
        rectify_format_info, Color, ECLevel, Version, FORMAT_INFO_BIT_LEN,
        FORMAT_INFO_COORDS_MAIN, FORMAT_INFO_COORDS_SIDE,
    },
};

/// Square grid of light & dark modules, `4 * version + 17` modules wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    grid: Vec<Color>,
    w: usize,
    ver: Version,
}

// Matrix utils
//------------------------------------------------------------------------------

impl Matrix {
    pub fn new(ver: Version) -> Self {
        let w = ver.width();
        Self { grid: vec![Color::Light; w * w], w, ver }
    }

    pub fn grid(&self) -> &[Color] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m == Color::Dark).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1) + 1) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                res.push(self.get(i, j).select('#', '.'));
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row out of bounds: {r}");
        debug_assert!(-w <= c && c < w, "Column out of bounds: {c}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    /// Negative coordinates count back from the far edge.
    pub fn get(&self, r: i16, c: i16) -> Color {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, clr: Color) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = clr;
    }

    pub fn fill_area(&mut self, r: i16, c: i16, width: i16, height: i16, clr: Color) {
        for i in r..r + height {
            for j in c..c + width {
                self.set(i, j, clr);
            }
        }
    }
}


// Fixed patterns
//------------------------------------------------------------------------------

impl Matrix {
    /// Stamps finders, separators, alignment, timing & the dark module. Calling
    /// it again leaves the matrix unchanged.
    pub fn place_fixed_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_separators();
        self.draw_alignment_pattern();
        self.draw_timing_patterns();
        self.draw_dark_module();
    }

    fn draw_finder_patterns(&mut self) {
        let w = self.w as i16;
        for (r, c) in [(0, 0), (w - 7, 0), (0, w - 7)] {
            self.fill_area(r, c, 7, 7, Color::Dark);
            self.fill_area(r + 1, c + 1, 5, 5, Color::Light);
            self.fill_area(r + 2, c + 2, 3, 3, Color::Dark);
        }
    }

    fn draw_separators(&mut self) {
        // Top left
        self.fill_area(7, 0, 8, 1, Color::Light);
        self.fill_area(0, 7, 1, 7, Color::Light);
        // Bottom left
        self.fill_area(-8, 0, 8, 1, Color::Light);
        self.fill_area(-7, 7, 1, 7, Color::Light);
        // Top right
        self.fill_area(7, -8, 8, 1, Color::Light);
        self.fill_area(0, -8, 1, 7, Color::Light);
    }

    fn draw_alignment_pattern(&mut self) {
        if !self.ver.has_alignment_pattern() {
            return;
        }
        self.fill_area(-9, -9, 5, 5, Color::Dark);
        self.fill_area(-8, -8, 3, 3, Color::Light);
        self.set(-7, -7, Color::Dark);
    }

    fn draw_timing_patterns(&mut self) {
        let w = self.w as i16;
        for i in 8..w - 8 {
            let clr = Color::from(i & 1 == 0);
            self.set(6, i, clr);
            self.set(i, 6, clr);
        }
    }

    fn draw_dark_module(&mut self) {
        self.set(-8, 8, Color::Dark);
    }

    // Marks every module outside the encoding region as dark, format info included
    pub(crate) fn reserve_function_areas(&mut self) {
        let w = self.w as i16;
        // Finders, separators & format info
        self.fill_area(0, 0, 9, 9, Color::Dark);
        self.fill_area(0, -8, 8, 9, Color::Dark);
        self.fill_area(-8, 0, 9, 8, Color::Dark);
        if self.ver.has_alignment_pattern() {
            self.fill_area(-9, -9, 5, 5, Color::Dark);
        }
        // Timing
        self.fill_area(6, 9, w - 17, 1, Color::Dark);
        self.fill_area(9, 6, 1, w - 17, Color::Dark);
        self.draw_dark_module();
    }
}


// Format info
//------------------------------------------------------------------------------

impl Matrix {
    /// Writes the 15 format bits into both copies of the format area.
    pub fn draw_format_info(&mut self, format_info: u32) {
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_SIDE);
    }

    fn draw_number(&mut self, number: u32, bit_len: usize, coords: &[(i16, i16)]) {
        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            self.set(r, c, Color::from(number & mask != 0));
            mask >>= 1;
        }
    }

    pub fn get_number(&self, coords: &[(i16, i16)]) -> u32 {
        coords.iter().fold(0, |n, &(r, c)| (n << 1) | u32::from(self.get(r, c)))
    }

    /// Reads the main format copy, falling back to the side copy.
    pub fn read_format_info(&self) -> QRResult<(ECLevel, MaskPattern)> {
        let main = self.get_number(&FORMAT_INFO_COORDS_MAIN);
        rectify_format_info(main)
            .or_else(|_| rectify_format_info(self.get_number(&FORMAT_INFO_COORDS_SIDE)))
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl Matrix {
    // Positions past the last codeword are remainder bits & carry 0 before masking
    pub(crate) fn draw_codewords(
        &mut self,
        seq: &[(i16, i16)],
        codewords: &[u8],
        mask: MaskPattern,
    ) {
        let mask_fn = mask.mask_function();
        for (i, &(r, c)) in seq.iter().enumerate() {
            let codeword = codewords.get(i >> 3).copied().unwrap_or(0);
            let bit = (codeword >> (7 - (i & 7))) & 1 == 1;
            self.set(r, c, Color::from(bit != mask_fn(r, c)));
        }
    }
}

#[cfg(test)]
mod encoding_region_tests {
    use super::Matrix;
    use crate::builder::masked_matrix;
    use crate::common::{
        iter::module_sequence,
        mask::MaskPattern,
        metadata::{Color, Version},
    };

    #[test]
    fn test_masked_matrix_places_bits_msb_first() {
        let ver = Version::new(1).unwrap();
        let mask = MaskPattern::new(1).unwrap();
        let m = masked_matrix(ver, &[0b1010_0000], mask);
        let seq = module_sequence(ver);
        let mask_fn = mask.mask_function();
        let exp = [true, false, true, false, false, false, false, false];
        for (&(r, c), &bit) in seq.iter().zip(exp.iter()) {
            assert_eq!(m.get(r, c), Color::from(bit != mask_fn(r, c)), "{r} {c}");
        }
    }

    #[test]
    fn test_masked_matrix_leaves_function_area_light() {
        let ver = Version::new(2).unwrap();
        let m = masked_matrix(ver, &[0xFF; 44], MaskPattern::new(0).unwrap());
        let mut reserved = Matrix::new(ver);
        reserved.reserve_function_areas();
        let w = ver.width() as i16;
        for r in 0..w {
            for c in 0..w {
                if reserved.get(r, c) == Color::Dark {
                    assert_eq!(m.get(r, c), Color::Light, "{r} {c}");
                }
            }
        }
    }

    #[test]
    fn test_unmasking_recovers_codewords() {
        let ver = Version::new(1).unwrap();
        let codewords = (0..26u8).map(|i| i.wrapping_mul(37)).collect::<Vec<_>>();
        let mask = MaskPattern::new(5).unwrap();
        let m = masked_matrix(ver, &codewords, mask);
        let mask_fn = mask.mask_function();

        let mut read = vec![0u8; 26];
        for (i, &(r, c)) in module_sequence(ver).iter().enumerate() {
            let bit = (m.get(r, c) == Color::Dark) != mask_fn(r, c);
            read[i >> 3] |= u8::from(bit) << (7 - (i & 7));
        }
        assert_eq!(read, codewords);
    }

    #[test]
    fn test_remainder_bits_are_zero_before_masking() {
        let ver = Version::new(2).unwrap();
        let mask = MaskPattern::new(0).unwrap();
        let m = masked_matrix(ver, &[0xFF; 44], mask);
        let seq = module_sequence(ver);
        let mask_fn = mask.mask_function();

        let tail = &seq[ver.total_codewords() * 8..];
        assert_eq!(tail.len(), ver.remainder_bits());
        for &(r, c) in tail {
            assert_eq!(m.get(r, c), Color::from(mask_fn(r, c)), "{r} {c}");
        }
    }
}
