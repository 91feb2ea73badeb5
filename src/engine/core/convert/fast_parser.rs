//! Allocation-free parsers for the textual numbers carried in chunk cells.

use crate::engine::errors::ConvertError;

/// Fixed-point decimal: `mantissa * 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal {
    pub mantissa: i128,
    pub scale: u32,
}

impl Decimal {
    pub fn to_f64(&self) -> f64 {
        self.mantissa as f64 / 10f64.powi(self.scale as i32)
    }
}

/// Splits an optional leading sign off `bytes`.
#[inline]
fn split_sign(bytes: &[u8]) -> (bool, &[u8], usize) {
    match bytes.first() {
        Some(b'-') => (true, &bytes[1..], 1),
        Some(b'+') => (false, &bytes[1..], 1),
        _ => (false, bytes, 0),
    }
}

macro_rules! parse_signed {
    ($name:ident, $ty:ty) => {
        pub fn $name(bytes: &[u8]) -> Result<$ty, ConvertError> {
            let (negative, digits, skip) = split_sign(bytes);
            if digits.is_empty() {
                return Err(ConvertError::Empty);
            }
            // Accumulate negatively so MIN parses without overflow.
            let mut acc: $ty = 0;
            for (i, &b) in digits.iter().enumerate() {
                let d = b.wrapping_sub(b'0');
                if d > 9 {
                    return Err(ConvertError::InvalidByte {
                        position: i + skip,
                        byte: b,
                    });
                }
                acc = acc
                    .checked_mul(10)
                    .and_then(|v| v.checked_sub(d as $ty))
                    .ok_or(ConvertError::Overflow)?;
            }
            if negative {
                Ok(acc)
            } else {
                acc.checked_neg().ok_or(ConvertError::Overflow)
            }
        }
    };
}

parse_signed!(parse_i32, i32);
parse_signed!(parse_i64, i64);

/// Parses `[+-]digits[.digits]` into a [`Decimal`] keeping the written scale.
pub fn parse_decimal(bytes: &[u8]) -> Result<Decimal, ConvertError> {
    let (negative, body, skip) = split_sign(bytes);
    if body.is_empty() || body == b"." {
        return Err(ConvertError::Empty);
    }
    let mut mantissa: i128 = 0;
    let mut scale: u32 = 0;
    let mut seen_point = false;
    for (i, &b) in body.iter().enumerate() {
        if b == b'.' && !seen_point {
            seen_point = true;
            continue;
        }
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return Err(ConvertError::InvalidByte {
                position: i + skip,
                byte: b,
            });
        }
        mantissa = mantissa
            .checked_mul(10)
            .and_then(|v| v.checked_add(d as i128))
            .ok_or(ConvertError::Overflow)?;
        if seen_point {
            scale += 1;
        }
    }
    Ok(Decimal {
        mantissa: if negative { -mantissa } else { mantissa },
        scale,
    })
}
