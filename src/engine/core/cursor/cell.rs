use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use crate::engine::core::convert::{Decimal, parse_decimal, parse_i32, parse_i64};
use crate::engine::errors::ConvertError;

/// Raw text bytes of one cell.
///
/// Borrows from chunk storage whenever the value is stored contiguously and
/// owns a reassembled copy otherwise. Type conversion is left to the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Utf8Buffer<'a> {
    bytes: Cow<'a, [u8]>,
}

impl<'a> Utf8Buffer<'a> {
    pub fn borrowed(bytes: &'a [u8]) -> Self {
        Self {
            bytes: Cow::Borrowed(bytes),
        }
    }

    pub fn owned(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Cow::Owned(bytes),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the view points into chunk storage without a copy.
    #[inline]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.bytes, Cow::Borrowed(_))
    }

    pub fn as_str(&self) -> Result<&str, ConvertError> {
        std::str::from_utf8(&self.bytes).map_err(|_| ConvertError::Utf8)
    }

    pub fn into_bytes(self) -> Cow<'a, [u8]> {
        self.bytes
    }

    pub fn to_i32(&self) -> Result<i32, ConvertError> {
        parse_i32(&self.bytes)
    }

    pub fn to_i64(&self) -> Result<i64, ConvertError> {
        parse_i64(&self.bytes)
    }

    pub fn to_decimal(&self) -> Result<Decimal, ConvertError> {
        parse_decimal(&self.bytes)
    }
}

impl<'a> From<Cow<'a, [u8]>> for Utf8Buffer<'a> {
    fn from(bytes: Cow<'a, [u8]>) -> Self {
        Self { bytes }
    }
}

impl Deref for Utf8Buffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq<[u8]> for Utf8Buffer<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&str> for Utf8Buffer<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Debug for Utf8Buffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Utf8Buffer({:?})", String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Display for Utf8Buffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}
