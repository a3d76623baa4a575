//! # qrmatrix
//!
//! Builds the module matrix of small QR symbols: byte mode data encoding, Reed-Solomon
//! error correction over GF(256), function patterns, format info & best mask selection.
//!
//! ## Scope
//!
//! - **Versions**: 1 to 6, restricted to layouts with a single error correction block
//! - **Modes**: byte mode over Latin-1 text. Other modes are detected & reported as errors
//! - **Masking**: all eight patterns are scored with the four penalty rules & the lowest wins
//!
//! ## Quick Start
//!
//! ```rust
//! use qrmatrix::{encode, ECLevel, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (matrix, mask) = encode("https://www.qrcode.com/", Version::new(2)?, ECLevel::M)?;
//! assert_eq!(matrix.width(), 25);
//! assert_eq!(*mask, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrmatrix::{QRBuilder, ECLevel, MaskPattern, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Hello, world!")
//!     .version(Version::new(1)?)       // Defaults to version 2
//!     .ec_level(ECLevel::L)            // Defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)      // If not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! for r in 0..qr.width() as i16 {
//!     let row = (0..qr.width() as i16).map(|c| qr.get(r, c).select('#', ' '));
//!     println!("{}", row.collect::<String>());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Features
//! - **parallel**: scores the eight mask candidates on the rayon thread pool

#![allow(
    clippy::items_after_test_module,
    clippy::suspicious_arithmetic_impl,
    clippy::suspicious_op_assign_impl
)]

pub mod builder;
pub mod common;

pub use builder::{
    assemble_candidate, codewords, encode, encode_with_config, masked_matrix, Matrix, QRBuilder,
    QR,
};
pub use common::codec::{classify, encode_byte_mode, encode_data, Mode};
pub use common::ec::{compute_edc, div, generator_polynomial, mul, poly_mul, poly_rest, G};
pub use common::error::{QRError, QRResult};
pub use common::iter::{module_sequence, ZigzagIter};
#[cfg(feature = "parallel")]
pub use common::mask::apply_best_mask_par;
pub use common::mask::{apply_best_mask, penalty_score, MaskPattern};
pub use common::metadata::{
    decode_format_info, format_info, rectify_format_info, Color, Config, ECLevel, Version,
};
pub use common::BitStream;
