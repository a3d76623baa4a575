use unicode_script::{Script, UnicodeScript};

use super::{
    bitstream::BitStream,
    error::{QRError, QRResult},
    metadata::Config,
};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
    Eci = 0b0111,
}

impl Mode {
    pub fn indicator(self) -> u8 {
        self as u8
    }

    // Width of the character count field. ECI folds into byte mode
    pub fn char_count_bits(self, version: usize) -> usize {
        let i = match version {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Self::Numeric => [10, 12, 14][i],
            Self::Alphanumeric => [9, 11, 13][i],
            Self::Byte | Self::Eci => [8, 16, 16][i],
            Self::Kanji => [8, 10, 12][i],
        }
    }

    pub fn contains(self, ch: char) -> bool {
        match self {
            Self::Numeric => ch.is_ascii_digit(),
            Self::Alphanumeric => {
                ch.is_ascii_digit()
                    || ch.is_ascii_uppercase()
                    || matches!(ch, ' ' | '$' | '%' | '*' | '+' | '-' | '.' | '/' | ':')
            }
            Self::Byte => u8::try_from(ch).is_ok(),
            Self::Kanji => is_kanji(ch),
            Self::Eci => true,
        }
    }
}

// Kanji mode covers Han, Hiragana & Katakana, script extensions included
fn is_kanji(ch: char) -> bool {
    let scx = ch.script_extension();
    [Script::Han, Script::Hiragana, Script::Katakana].into_iter().any(|s| scx.contains_script(s))
}

/// Picks the most restrictive mode that holds every character of `text`.
pub fn classify(text: &str) -> Mode {
    [Mode::Numeric, Mode::Alphanumeric, Mode::Byte, Mode::Kanji]
        .into_iter()
        .find(|&m| text.chars().all(|ch| m.contains(ch)))
        .unwrap_or(Mode::Eci)
}

#[cfg(test)]
mod mode_tests {
    use test_case::test_case;

    use super::{classify, Mode};

    #[test_case("", Mode::Numeric)]
    #[test_case("0123456789", Mode::Numeric)]
    #[test_case("HELLO WORLD", Mode::Alphanumeric)]
    #[test_case("$%*+-./:", Mode::Alphanumeric)]
    #[test_case("https://www.qrcode.com/", Mode::Byte)]
    #[test_case("Grüße", Mode::Byte)]
    #[test_case("漢字", Mode::Kanji)]
    #[test_case("ひらがな", Mode::Kanji)]
    #[test_case("ｶﾀｶﾅ", Mode::Kanji)]
    #[test_case("们", Mode::Kanji)]
    #[test_case("カタカナー", Mode::Kanji)]
    #[test_case("漢字 kanji", Mode::Eci)]
    #[test_case("Яблоко", Mode::Eci)]
    #[test_case("αβγ", Mode::Eci)]
    #[test_case("─", Mode::Eci)]
    #[test_case("Hello, world! 🌏", Mode::Eci)]
    fn test_classify(text: &str, exp: Mode) {
        assert_eq!(classify(text), exp);
    }

    #[test_case(Mode::Numeric, 1, 10)]
    #[test_case(Mode::Alphanumeric, 10, 11)]
    #[test_case(Mode::Byte, 9, 8)]
    #[test_case(Mode::Byte, 10, 16)]
    #[test_case(Mode::Eci, 27, 16)]
    #[test_case(Mode::Kanji, 40, 12)]
    fn test_char_count_bits(mode: Mode, version: usize, exp: usize) {
        assert_eq!(mode.char_count_bits(version), exp);
    }

    #[test]
    fn test_indicator() {
        assert_eq!(Mode::Byte.indicator(), 0b0100);
        assert_eq!(Mode::Eci.indicator(), 0b0111);
    }
}

// Byte mode encoder
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0xEC, 0x11];

const TERMINATOR_BIT_LEN: usize = 4;

/// Encodes Latin-1 `text` into exactly `data_codewords` bytes: mode indicator,
/// character count, payload, terminator & padding.
pub fn encode_byte_mode(
    text: &str,
    length_bits: usize,
    data_codewords: usize,
) -> QRResult<Vec<u8>> {
    let bytes = text
        .chars()
        .map(|ch| u8::try_from(ch).map_err(|_| QRError::UnsupportedMode(classify(text))))
        .collect::<QRResult<Vec<u8>>>()?;

    // The count field is written from a usize
    if length_bits > usize::BITS as usize {
        return Err(QRError::InvalidCodewordCount);
    }

    let char_count = bytes.len();
    if length_bits < usize::BITS as usize && char_count >> length_bits != 0 {
        return Err(QRError::DataTooLong);
    }

    let bit_cap = data_codewords << 3;
    let bit_len = 4 + length_bits + (char_count << 3);
    if bit_len > bit_cap {
        return Err(QRError::DataTooLong);
    }

    let mut bs = BitStream::new(bit_cap);
    bs.push_bits(Mode::Byte.indicator(), 4);
    bs.push_bits(char_count, length_bits);
    for b in bytes {
        bs.push_bits(b, 8);
    }
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);

    debug_assert_eq!(bs.len(), bit_cap, "Padding left unused capacity");
    Ok(bs.into_bytes())
}

fn push_terminator(bs: &mut BitStream) {
    let len = TERMINATOR_BIT_LEN.min(bs.remaining());
    bs.push_bits(0u8, len);
}

fn pad_remaining_capacity(bs: &mut BitStream) {
    let offset = bs.len() & 7;
    if offset > 0 {
        bs.push_bits(0u8, 8 - offset);
    }
    for &pad in PADDING_CODEWORDS.iter().cycle() {
        if bs.remaining() < 8 {
            break;
        }
        bs.push_bits(pad, 8);
    }
}

/// Data codewords for `text` under `config`. Only byte mode has an encoder.
pub fn encode_data(text: &str, config: &Config) -> QRResult<Vec<u8>> {
    if text.is_empty() {
        return Err(QRError::EmptyData);
    }
    match classify(text) {
        Mode::Byte => encode_byte_mode(text, config.length_bits(), config.data_codewords()),
        mode => Err(QRError::UnsupportedMode(mode)),
    }
}
