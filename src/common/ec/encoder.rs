use super::galois::{poly_mul, poly_rest, EXP_TABLE};
use crate::common::error::{QRError, QRResult};

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Product of `(x - α^i)` for `i` in `0..degree`.
pub fn generator_polynomial(degree: usize) -> Vec<u8> {
    (0..degree).fold(vec![1], |poly, i| poly_mul(&poly, &[1, EXP_TABLE[i % 255]]))
}

// EDC: Error correction codeword generator
// Pads data with zeros up to the total codeword count & divides by the
// generator polynomial. The remainder coefficients are the EDC
pub fn compute_edc(data: &[u8], total_codewords: usize) -> QRResult<Vec<u8>> {
    if data.len() > total_codewords {
        return Err(QRError::InvalidCodewordCount);
    }
    let degree = total_codewords - data.len();

    let mut msg = data.to_vec();
    msg.resize(total_codewords, 0);

    poly_rest(&msg, &generator_polynomial(degree))
}
