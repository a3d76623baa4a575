use std::ops::{Add, AddAssign, Mul, Sub};

use crate::common::error::{QRError, QRResult};

// Galois field tables
//------------------------------------------------------------------------------

// x^8 + x^4 + x^3 + x^2 + 1
pub const PRIMITIVE_POLY: u16 = 0x11D;

// EXP_TABLE[i] = α^i, with α^255 wrapping back to 1
pub static EXP_TABLE: [u8; 256] = build_exp_table();

// LOG_TABLE[α^i] = i. LOG_TABLE[0] is undefined and left as 0
pub static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 256 {
        table[i] = x as u8;
        x <<= 1;
        if x > 0xFF {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}


// Field element
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct G(pub u8);

impl G {
    pub fn gen_pow(exp: usize) -> Self {
        Self(EXP_TABLE[exp % 255])
    }
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

// Subtraction and addition coincide in characteristic 2
impl Sub for G {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(mul(self.0, rhs.0))
    }
}

// Scalar operations
//------------------------------------------------------------------------------

pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    EXP_TABLE[log_sum % 255]
}

pub fn div(a: u8, b: u8) -> QRResult<u8> {
    if b == 0 {
        return Err(QRError::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let log_diff = LOG_TABLE[a as usize] as usize + 255 - LOG_TABLE[b as usize] as usize;
    Ok(EXP_TABLE[log_diff % 255])
}

#[cfg(test)]
mod scalar_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::{div, mul, G};
    use crate::common::error::QRError;

    #[test_case(0, 0x53, 0)]
    #[test_case(0x53, 0, 0)]
    #[test_case(1, 0xa7, 0xa7)]
    #[test_case(2, 0x80, 0x1d)]
    #[test_case(0x53, 0xca, 0x8f)]
    fn test_mul(a: u8, b: u8, exp: u8) {
        assert_eq!(mul(a, b), exp);
        assert_eq!(G(a) * G(b), G(exp));
    }

    #[test]
    fn test_div() {
        assert_eq!(div(0x8f, 0xca), Ok(0x53));
        assert_eq!(div(0, 0xca), Ok(0));
        assert_eq!(div(0x1d, 1), Ok(0x1d));
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(div(0x12, 0), Err(QRError::DivisionByZero));
        assert_eq!(div(0, 0), Err(QRError::DivisionByZero));
    }

    #[test]
    fn test_add_is_xor() {
        let mut g = G(0b1010);
        g += G(0b0110);
        assert_eq!(g, G(0b1100));
        assert_eq!(G(0x53) + G(0x53), G(0));
        assert_eq!(G(0x53) - G(0xca), G(0x53) + G(0xca));
    }

    proptest! {
        #[test]
        fn proptest_mul_commutes(a: u8, b: u8) {
            prop_assert_eq!(mul(a, b), mul(b, a));
        }

        #[test]
        fn proptest_div_inverts_mul(a: u8, b in 1u8..=255) {
            prop_assert_eq!(div(mul(a, b), b), Ok(a));
        }

        #[test]
        fn proptest_mul_distributes(a: u8, b: u8, c: u8) {
            prop_assert_eq!(mul(a, b ^ c), mul(a, b) ^ mul(a, c));
        }
    }
}

// Polynomial operations
//------------------------------------------------------------------------------

// Coefficients are ordered from the highest degree term down

pub fn poly_mul(a: &[u8], b: &[u8]) -> Vec<u8> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut res = vec![G(0); a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            res[i + j] += G(x) * G(y);
        }
    }
    res.into_iter().map(u8::from).collect()
}

/// Remainder of `dividend / divisor` by long division. The result always has
/// `divisor.len() - 1` coefficients.
pub fn poly_rest(dividend: &[u8], divisor: &[u8]) -> QRResult<Vec<u8>> {
    let lead = match divisor.first() {
        Some(&l) if l != 0 => l,
        _ => return Err(QRError::DivisionByZero),
    };
    let rem_len = divisor.len() - 1;
    let quot_len = (dividend.len() + 1).saturating_sub(divisor.len());

    let mut rest = dividend.to_vec();
    for i in 0..quot_len {
        let coeff = rest[i];
        if coeff == 0 {
            continue;
        }
        let factor = div(coeff, lead)?;
        for (r, &d) in rest[i..].iter_mut().zip(divisor) {
            *r ^= mul(d, factor);
        }
    }

    let tail = rest.split_off(quot_len);
    let mut res = vec![0; rem_len - tail.len()];
    res.extend(tail);
    Ok(res)
}
