//! ZX Spectrum packed floating-point literals.
//!
//! The ROM calculator stores numbers in a 5-byte form: a biased exponent
//! byte followed by a 32-bit mantissa whose top bit doubles as the sign.
//! An exponent byte of zero selects a small-integer form instead, where the
//! second byte is a sign marker and the next two bytes hold a 16-bit value.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FloatError {
    #[error("a packed float must be exactly 5 bytes, got {0}")]
    InvalidLength(usize),
}

/// Decoder for the 5-byte packed number format
pub struct FloatNumber;

impl FloatNumber {
    /// Decode a 5-byte packed number
    pub fn from_bytes(bytes: &[u8]) -> Result<f64, FloatError> {
        if bytes.len() != 5 {
            return Err(FloatError::InvalidLength(bytes.len()));
        }

        if bytes[0] == 0 {
            // Small-integer form
            let neg = bytes[1] == 0xff;
            let value = bytes[2] as f64 + bytes[3] as f64 * 256.0;
            return Ok(if neg { -value } else { value });
        }

        let sign = if bytes[1] & 0x80 == 0 { 1.0 } else { -1.0 };
        let mant_upper = ((((bytes[1] & 0x7f) | 0x80) as u64) << 24) as f64;
        let mant = mant_upper
            + ((bytes[2] as u64) << 16) as f64
            + ((bytes[3] as u64) << 8) as f64
            + bytes[4] as f64;
        let exp = bytes[0] as i32 - 128 - 32;
        Ok(sign * mant * 2f64.powi(exp))
    }

    /// Decode the compact form used inside calculator bytecode, where the
    /// exponent is packed into the low bits of the first byte (or spills
    /// into a second byte when those bits are zero)
    pub fn from_compact_bytes(bytes: &[u8]) -> Result<f64, FloatError> {
        let mut copy_from = 1;
        let mut exp = bytes.first().copied().unwrap_or(0) & 0x3f;
        if exp == 0 {
            exp = bytes.get(1).copied().unwrap_or(0);
            copy_from = 2;
        }
        let mut unpacked = [0u8; 5];
        unpacked[0] = exp.wrapping_add(0x50);
        let mantissa = bytes.get(copy_from..).unwrap_or(&[]);
        for (slot, value) in unpacked[1..].iter_mut().zip(mantissa.iter()) {
            *slot = *value;
        }
        Self::from_bytes(&unpacked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_form() {
        assert_eq!(FloatNumber::from_bytes(&[0, 0, 10, 0, 0]), Ok(10.0));
        assert_eq!(FloatNumber::from_bytes(&[0, 0xff, 10, 0, 0]), Ok(-10.0));
        assert_eq!(FloatNumber::from_bytes(&[0, 0, 0x34, 0x12, 0]), Ok(4660.0));
    }

    #[test]
    fn test_exponent_form() {
        // 0.5: exponent 0x80, positive, mantissa 0x80000000
        assert_eq!(FloatNumber::from_bytes(&[0x80, 0, 0, 0, 0]), Ok(0.5));
        // 1.0
        assert_eq!(FloatNumber::from_bytes(&[0x81, 0, 0, 0, 0]), Ok(1.0));
        // -1.0
        assert_eq!(FloatNumber::from_bytes(&[0x81, 0x80, 0, 0, 0]), Ok(-1.0));
        // pi/2 is close to 1.5707963
        let half_pi = FloatNumber::from_bytes(&[0x81, 0x49, 0x0f, 0xda, 0xa2]);
        assert!((half_pi.unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-7);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(
            FloatNumber::from_bytes(&[0, 0, 0]),
            Err(FloatError::InvalidLength(3))
        );
    }

    #[test]
    fn test_compact_form() {
        // Inline exponent: 0x31 + 0x50 = 0x81 -> 1.0
        assert_eq!(FloatNumber::from_compact_bytes(&[0x31, 0/*mant*/]), Ok(1.0));
        // Spilled exponent: first byte 0x40-sized field zero, second byte holds it
        assert_eq!(FloatNumber::from_compact_bytes(&[0x40, 0x31, 0]), Ok(1.0));
    }
}
