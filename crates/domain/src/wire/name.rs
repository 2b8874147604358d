//! Domain name encoding: length-prefixed labels ending in a zero byte.
//!
//! ```text
//!   0  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! | 1  1|                OFFSET                   |   compression pointer
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```
//!
//! [`decode_name`] recognises compression pointers but does not follow them:
//! a pointer yields an empty name and a consumed length of 2. Callers holding
//! the whole message can use [`resolve_name`] instead. Names are never
//! compressed on the way out.

use super::bits::{clear_bit, has_bit};
use super::{take, MAX_LABEL_LEN};
use crate::errors::{DecodeError, EncodeError};

/// The first token of a wire name: either a label length or a pointer back
/// into the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthOrPointer {
    Length(u8),
    Pointer(u16),
}

fn read_token(buf: &[u8], at: usize) -> Result<LengthOrPointer, DecodeError> {
    let first = take(buf, at, 1)?[0];
    if has_bit(first, 0) && has_bit(first, 1) {
        let second = take(buf, at + 1, 1)?[0];
        let high = clear_bit(clear_bit(first, 0), 1);
        Ok(LengthOrPointer::Pointer(u16::from_be_bytes([high, second])))
    } else {
        Ok(LengthOrPointer::Length(first))
    }
}

pub fn decode_length_or_pointer(data: &[u8]) -> Result<LengthOrPointer, DecodeError> {
    read_token(data, 0)
}

/// Decodes the name starting at offset 0 of `buf`.
///
/// Returns the dotted name and the number of bytes it occupies, including the
/// terminating zero. A compression pointer anywhere in the name short-circuits
/// to `("", 2)`.
pub fn decode_name(buf: &[u8]) -> Result<(String, usize), DecodeError> {
    let mut name = String::new();
    let mut i = 0;

    loop {
        match read_token(buf, i)? {
            LengthOrPointer::Pointer(_) => return Ok((String::new(), 2)),
            LengthOrPointer::Length(0) => return Ok((name, i + 1)),
            LengthOrPointer::Length(len) => {
                let label = take(buf, i + 1, usize::from(len))?;
                if i != 0 {
                    name.push('.');
                }
                name.push_str(&String::from_utf8_lossy(label));
                i += usize::from(len) + 1;
            }
        }
    }
}

/// Decodes the name at `offset` inside a complete message, following
/// compression pointers.
///
/// The consumed length is measured at `offset`: once the first pointer is
/// taken, the name occupies exactly the bytes up to and including that
/// pointer. Revisiting a pointer target is reported as a loop.
pub fn resolve_name(message: &[u8], offset: usize) -> Result<(String, usize), DecodeError> {
    let mut name = String::new();
    let mut pos = offset;
    let mut consumed: Option<usize> = None;
    let mut visited: Vec<usize> = Vec::new();

    loop {
        match read_token(message, pos)? {
            LengthOrPointer::Pointer(target) => {
                let target = usize::from(target);
                if target >= message.len() {
                    return Err(DecodeError::PointerOutOfBounds { offset: target });
                }
                if visited.contains(&target) {
                    return Err(DecodeError::PointerLoop { offset: target });
                }
                visited.push(target);
                consumed.get_or_insert_with(|| pos + 2 - offset);
                pos = target;
            }
            LengthOrPointer::Length(0) => {
                let consumed = *consumed.get_or_insert_with(|| pos + 1 - offset);
                return Ok((name, consumed));
            }
            LengthOrPointer::Length(len) => {
                let label = take(message, pos + 1, usize::from(len))?;
                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&String::from_utf8_lossy(label));
                pos += usize::from(len) + 1;
            }
        }
    }
}

/// Encodes a dotted name as uncompressed labels.
///
/// Empty labels are skipped, so `""` and `"."` both encode to the root name.
pub fn encode_name(name: &str) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(name.len() + 2);
    for label in name.split('.').filter(|label| !label.is_empty()) {
        if label.len() > MAX_LABEL_LEN {
            return Err(EncodeError::LabelTooLong {
                label: label.to_string(),
                len: label.len(),
            });
        }
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    Ok(out)
}
