//! DNS wire format (RFC 1035 §4).
pub mod bits;
pub mod message;
pub mod name;
pub mod record_type;

pub use message::{
    decode_answer, decode_header, decode_packet, decode_question, decode_request,
    decode_response, encode_answer, encode_header, encode_packet, encode_question,
    encode_request, encode_response, Header, Packet, Question, Request, ResourceRecord, Response,
};
pub use name::{decode_length_or_pointer, decode_name, encode_name, resolve_name, LengthOrPointer};
pub use record_type::RecordType;

use crate::errors::DecodeError;

pub const HEADER_LEN: usize = 12;

/// Largest datagram a plain (non-EDNS) UDP exchange carries.
pub const MAX_UDP_PACKET: usize = 512;

/// Longest label whose length byte does not collide with the pointer tag.
pub const MAX_LABEL_LEN: usize = 0b1011_1111;

/// RCODE 5, "Refused": the server declines the query for policy reasons.
pub const RCODE_REFUSED: u8 = 0b0101;

#[inline]
pub(crate) fn take(buf: &[u8], at: usize, len: usize) -> Result<&[u8], DecodeError> {
    let end = at.saturating_add(len);
    buf.get(at..end).ok_or(DecodeError::Truncated {
        needed: end,
        available: buf.len(),
    })
}

#[inline]
pub(crate) fn read_u16(buf: &[u8], at: usize) -> Result<u16, DecodeError> {
    let b = take(buf, at, 2)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

#[inline]
pub(crate) fn read_u32(buf: &[u8], at: usize) -> Result<u32, DecodeError> {
    let b = take(buf, at, 4)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}
