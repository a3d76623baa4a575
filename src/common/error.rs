use std::fmt::{Debug, Display, Error, Formatter};

use super::codec::Mode;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Data encoding
    EmptyData,
    DataTooLong,
    UnsupportedMode(Mode),

    // Configuration
    InvalidVersion,
    UnsupportedBlockLayout,
    InvalidCodewordCount,
    InvalidMaskingPattern,

    // Field arithmetic
    DivisionByZero,

    // Format info
    InvalidFormatInfo,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            // Data encoding
            Self::EmptyData => "Empty data",
            Self::DataTooLong => "Data too long",
            Self::UnsupportedMode(mode) => {
                return write!(f, "No encoder available for {mode:?} mode");
            }

            // Configuration
            Self::InvalidVersion => "Invalid version",
            Self::UnsupportedBlockLayout => "Version & error correction level need multiple blocks",
            Self::InvalidCodewordCount => "Invalid codeword count",
            Self::InvalidMaskingPattern => "Invalid masking pattern",

            // Field arithmetic
            Self::DivisionByZero => "Division by zero in GF(256)",

            // Format info
            Self::InvalidFormatInfo => "Invalid format info detected",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;
    use crate::common::codec::Mode;

    #[test]
    fn test_display() {
        assert_eq!(QRError::DataTooLong.to_string(), "Data too long");
        assert_eq!(
            QRError::UnsupportedMode(Mode::Kanji).to_string(),
            "No encoder available for Kanji mode"
        );
    }
}
