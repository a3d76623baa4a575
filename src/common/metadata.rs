use std::ops::{Deref, Not};

use super::{
    codec::Mode,
    error::{QRError, QRResult},
    mask::MaskPattern,
};

// Version
//------------------------------------------------------------------------------

/// Symbol version. Only versions with at most one alignment pattern and no
/// version information blocks are supported.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(pub(crate) usize);

impl Version {
    pub const MIN: usize = 1;
    pub const MAX: usize = 6;

    pub fn new(version: usize) -> QRResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&version) {
            return Err(QRError::InvalidVersion);
        }
        Ok(Self(version))
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub const fn has_alignment_pattern(self) -> bool {
        self.0 >= 2
    }

    pub fn total_codewords(self) -> usize {
        TOTAL_CODEWORDS[self.0 - 1]
    }

    pub fn remainder_bits(self) -> usize {
        match self.0 {
            1 => 0,
            _ => 7,
        }
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

static TOTAL_CODEWORDS: [usize; Version::MAX] = [26, 44, 70, 100, 134, 172];


// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    // Two bit indicator used in format info
    pub fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }

    pub fn from_format_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b01 => Self::L,
            0b00 => Self::M,
            0b11 => Self::Q,
            _ => Self::H,
        }
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Color {
    Light = 0,
    Dark = 1,
}

impl Color {
    pub fn select<T>(self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        self.select(Self::Light, Self::Dark)
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl From<Color> for u8 {
    fn from(clr: Color) -> Self {
        clr as u8
    }
}

impl From<Color> for u32 {
    fn from(clr: Color) -> Self {
        clr as u32
    }
}

// Config
//------------------------------------------------------------------------------

/// Parameters of one encoding run. Everything downstream of the builder reads
/// codeword counts from here.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Config {
    version: Version,
    ec_level: ECLevel,
    total_codewords: usize,
    data_codewords: usize,
    length_bits: usize,
}

impl Config {
    /// Looks up codeword counts for symbols whose error correction fits in a
    /// single Reed-Solomon block.
    pub fn new(version: Version, ec_level: ECLevel) -> QRResult<Self> {
        let data_codewords = match (*version, ec_level) {
            (1, ECLevel::L) => 19,
            (1, ECLevel::M) => 16,
            (1, ECLevel::Q) => 13,
            (1, ECLevel::H) => 9,
            (2, ECLevel::L) => 34,
            (2, ECLevel::M) => 28,
            (2, ECLevel::Q) => 22,
            (2, ECLevel::H) => 16,
            (3, ECLevel::L) => 55,
            (3, ECLevel::M) => 44,
            (4, ECLevel::L) => 80,
            (5, ECLevel::L) => 108,
            _ => return Err(QRError::UnsupportedBlockLayout),
        };
        Self::with_codewords(version, ec_level, version.total_codewords(), data_codewords)
    }

    pub fn with_codewords(
        version: Version,
        ec_level: ECLevel,
        total_codewords: usize,
        data_codewords: usize,
    ) -> QRResult<Self> {
        if data_codewords == 0
            || data_codewords >= total_codewords
            || total_codewords > version.total_codewords()
        {
            return Err(QRError::InvalidCodewordCount);
        }
        let length_bits = Mode::Byte.char_count_bits(*version);
        Ok(Self { version, ec_level, total_codewords, data_codewords, length_bits })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn total_codewords(&self) -> usize {
        self.total_codewords
    }

    pub fn data_codewords(&self) -> usize {
        self.data_codewords
    }

    pub fn ec_codewords(&self) -> usize {
        self.total_codewords - self.data_codewords
    }

    pub fn length_bits(&self) -> usize {
        self.length_bits
    }
}


// Format info
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const FORMAT_ERROR_BIT_LEN: usize = 10;

pub const FORMAT_ERROR_CAPACITY: u32 = 3;

// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const FORMAT_GENERATOR: u32 = 0b101_0011_0111;

pub const FORMAT_MASK: u32 = 0b101_0100_0001_0010;

// Most significant bit first. Negative indices wrap from the far edge.
pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

// Remainder of a GF(2) polynomial of degree < 15 divided by the format generator
fn bch_remainder(mut poly: u32) -> u32 {
    for i in (FORMAT_ERROR_BIT_LEN..FORMAT_INFO_BIT_LEN).rev() {
        if poly & (1 << i) != 0 {
            poly ^= FORMAT_GENERATOR << (i - FORMAT_ERROR_BIT_LEN);
        }
    }
    poly & ((1 << FORMAT_ERROR_BIT_LEN) - 1)
}

/// 15 bit format info: 2 bits of error correction level, 3 bits of mask
/// pattern and 10 bits of BCH remainder, XORed with [`FORMAT_MASK`].
pub fn format_info(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    let data = (ec_level.format_bits() << 3) | u32::from(*mask);
    let shifted = data << FORMAT_ERROR_BIT_LEN;
    (shifted | bch_remainder(shifted)) ^ FORMAT_MASK
}

/// Exact inverse of [`format_info`].
pub fn decode_format_info(format: u32) -> QRResult<(ECLevel, MaskPattern)> {
    if format >> FORMAT_INFO_BIT_LEN != 0 {
        return Err(QRError::InvalidFormatInfo);
    }
    let raw = format ^ FORMAT_MASK;
    if bch_remainder(raw) != 0 {
        return Err(QRError::InvalidFormatInfo);
    }
    let data = raw >> FORMAT_ERROR_BIT_LEN;
    let ec_level = ECLevel::from_format_bits(data >> 3);
    let mask = MaskPattern::new((data & 0b111) as u8)?;
    Ok((ec_level, mask))
}

/// Decodes format info after correcting up to [`FORMAT_ERROR_CAPACITY`] flipped bits.
pub fn rectify_format_info(format: u32) -> QRResult<(ECLevel, MaskPattern)> {
    let mut best = None;
    let mut best_dist = u32::MAX;
    for ecl in ECLevel::ALL {
        for mask in MaskPattern::all() {
            let dist = (format_info(ecl, mask) ^ format).count_ones();
            if dist < best_dist {
                best_dist = dist;
                best = Some((ecl, mask));
            }
        }
    }
    match best {
        Some(info) if best_dist <= FORMAT_ERROR_CAPACITY => Ok(info),
        _ => Err(QRError::InvalidFormatInfo),
    }
}

#[cfg(test)]
mod format_info_tests {
    use test_case::test_case;

    use super::{
        bch_remainder, decode_format_info, format_info, rectify_format_info, ECLevel,
        FORMAT_MASK,
    };
    use crate::common::{error::QRError, mask::MaskPattern};

    #[test_case(ECLevel::L, 0, 0b111011111000100)]
    #[test_case(ECLevel::L, 7, 0b110100101110110)]
    #[test_case(ECLevel::M, 0, 0b101010000010010)]
    #[test_case(ECLevel::M, 2, 0b101111001111100)]
    #[test_case(ECLevel::Q, 7, 0b010101111101101)]
    #[test_case(ECLevel::H, 4, 0b000011101100010)]
    fn test_format_info(ecl: ECLevel, mask: u8, exp: u32) {
        assert_eq!(format_info(ecl, MaskPattern::new(mask).unwrap()), exp);
    }

    #[test]
    fn test_format_info_round_trip() {
        for ecl in ECLevel::ALL {
            for mask in MaskPattern::all() {
                let f = format_info(ecl, mask);
                assert!(f < 1 << 15, "Format info overflows 15 bits: {f:b}");
                assert_eq!(bch_remainder(f ^ FORMAT_MASK), 0);
                assert_eq!(decode_format_info(f), Ok((ecl, mask)));
            }
        }
    }

    #[test]
    fn test_decode_corrupted_format_info() {
        let f = format_info(ECLevel::Q, MaskPattern::new(5).unwrap());
        assert_eq!(decode_format_info(f ^ 0b100), Err(QRError::InvalidFormatInfo));
        assert_eq!(decode_format_info(f | 1 << 15), Err(QRError::InvalidFormatInfo));
    }

    #[test_case(0b1)]
    #[test_case(0b1000_0000_0000_001)]
    #[test_case(0b0100_0010_0000_100)]
    fn test_rectify_format_info(err: u32) {
        let mask = MaskPattern::new(6).unwrap();
        let f = format_info(ECLevel::H, mask);
        assert_eq!(rectify_format_info(f ^ err), Ok((ECLevel::H, mask)));
    }

    #[test]
    fn test_rectify_too_many_errors() {
        let f = format_info(ECLevel::L, MaskPattern::new(1).unwrap());
        // 8 flips are beyond correction capacity for this word
        let res = rectify_format_info(f ^ 0b1111_1111);
        assert_ne!(res, Ok((ECLevel::L, MaskPattern::new(1).unwrap())));
    }
}
