//! Header, question and resource record codecs.
//!
//! ```text
//!   0  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      ID                       |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |              QDCOUNT / ANCOUNT                |
//! |              NSCOUNT / ARCOUNT                |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```
//!
//! `rcode` is read as the whole second flags byte minus the RA bit, so the Z
//! bits travel with it. Encoding writes it back the same way; a value that
//! round-trips must leave bit 0 (the RA position) clear.

use super::bits::{clear_bit, has_bit, set_bit_to};
use super::name::{decode_name, encode_name};
use super::{read_u16, read_u32, take, HEADER_LEN};
use crate::errors::{DecodeError, EncodeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Correlation token, echoed verbatim from query to response.
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: String,
    pub qtype: u16,
    pub qclass: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: u16,
    pub rclass: u16,
    /// Seconds; transported, never enforced.
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

/// A single-question query, the only shape the proxy needs to inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub header: Header,
    pub question: Question,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub header: Header,
    pub question: Question,
    pub answer: ResourceRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
}

pub fn decode_header(data: &[u8]) -> Result<Header, DecodeError> {
    let bytes = take(data, 0, HEADER_LEN)?;
    let flags = bytes[2];
    let status = bytes[3];

    Ok(Header {
        id: read_u16(bytes, 0)?,
        qr: has_bit(flags, 0),
        opcode: clear_bit(flags, 0) >> 3,
        aa: has_bit(flags, 5),
        tc: has_bit(flags, 6),
        rd: has_bit(flags, 7),
        ra: has_bit(status, 0),
        rcode: clear_bit(status, 0),
        qdcount: read_u16(bytes, 4)?,
        ancount: read_u16(bytes, 6)?,
        nscount: read_u16(bytes, 8)?,
        arcount: read_u16(bytes, 10)?,
    })
}

pub fn encode_header(header: &Header) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    out[0..2].copy_from_slice(&header.id.to_be_bytes());

    let mut flags = header.opcode << 3;
    flags = set_bit_to(flags, 0, header.qr);
    flags = set_bit_to(flags, 5, header.aa);
    flags = set_bit_to(flags, 6, header.tc);
    flags = set_bit_to(flags, 7, header.rd);
    out[2] = flags;
    out[3] = set_bit_to(header.rcode, 0, header.ra);

    out[4..6].copy_from_slice(&header.qdcount.to_be_bytes());
    out[6..8].copy_from_slice(&header.ancount.to_be_bytes());
    out[8..10].copy_from_slice(&header.nscount.to_be_bytes());
    out[10..12].copy_from_slice(&header.arcount.to_be_bytes());
    out
}

/// Decodes a question at offset 0 of `buf`; returns it with its length in bytes.
pub fn decode_question(buf: &[u8]) -> Result<(Question, usize), DecodeError> {
    let (qname, name_len) = decode_name(buf)?;
    let question = Question {
        qname,
        qtype: read_u16(buf, name_len)?,
        qclass: read_u16(buf, name_len + 2)?,
    };
    Ok((question, name_len + 4))
}

pub fn encode_question(question: &Question) -> Result<Vec<u8>, EncodeError> {
    let mut out = encode_name(&question.qname)?;
    out.extend_from_slice(&question.qtype.to_be_bytes());
    out.extend_from_slice(&question.qclass.to_be_bytes());
    Ok(out)
}

/// Decodes a resource record at offset 0 of `buf`; RDATA is copied out.
pub fn decode_answer(buf: &[u8]) -> Result<(ResourceRecord, usize), DecodeError> {
    let (name, name_len) = decode_name(buf)?;
    let rdlength = usize::from(read_u16(buf, name_len + 8)?);
    let rdata = take(buf, name_len + 10, rdlength)?.to_vec();

    let record = ResourceRecord {
        name,
        rtype: read_u16(buf, name_len)?,
        rclass: read_u16(buf, name_len + 2)?,
        ttl: read_u32(buf, name_len + 4)?,
        rdata,
    };
    Ok((record, name_len + 10 + rdlength))
}

pub fn encode_answer(record: &ResourceRecord) -> Result<Vec<u8>, EncodeError> {
    let rdlength = u16::try_from(record.rdata.len()).map_err(|_| EncodeError::RdataTooLong {
        len: record.rdata.len(),
    })?;

    let mut out = encode_name(&record.name)?;
    out.reserve(10 + record.rdata.len());
    out.extend_from_slice(&record.rtype.to_be_bytes());
    out.extend_from_slice(&record.rclass.to_be_bytes());
    out.extend_from_slice(&record.ttl.to_be_bytes());
    out.extend_from_slice(&rdlength.to_be_bytes());
    out.extend_from_slice(&record.rdata);
    Ok(out)
}

/// Decodes the header and the first question. Further questions are ignored
/// even when `qdcount` announces them.
pub fn decode_request(packet: &[u8]) -> Result<Request, DecodeError> {
    let header = decode_header(packet)?;
    let (question, _) = decode_question(&packet[HEADER_LEN..])?;
    Ok(Request { header, question })
}

pub fn encode_request(request: &Request) -> Result<Vec<u8>, EncodeError> {
    let mut out = encode_header(&request.header).to_vec();
    out.extend(encode_question(&request.question)?);
    Ok(out)
}

/// Decodes a message known to hold exactly one question and one answer.
pub fn decode_response(packet: &[u8]) -> Result<Response, DecodeError> {
    let header = decode_header(packet)?;
    let (question, question_len) = decode_question(&packet[HEADER_LEN..])?;
    let (answer, _) = decode_answer(&packet[HEADER_LEN + question_len..])?;
    Ok(Response {
        header,
        question,
        answer,
    })
}

pub fn encode_response(response: &Response) -> Result<Vec<u8>, EncodeError> {
    let mut out = encode_header(&response.header).to_vec();
    out.extend(encode_question(&response.question)?);
    out.extend(encode_answer(&response.answer)?);
    Ok(out)
}

/// Decodes `qdcount` questions followed by `ancount` answers.
///
/// Authority and additional sections stay undecoded; their counts are kept in
/// the header as received.
pub fn decode_packet(packet: &[u8]) -> Result<Packet, DecodeError> {
    let header = decode_header(packet)?;

    // Counts come off the wire; never reserve more slots than the buffer could hold.
    let mut questions = Vec::with_capacity(usize::from(header.qdcount).min(packet.len()));
    let mut answers = Vec::with_capacity(usize::from(header.ancount).min(packet.len()));

    let mut offset = HEADER_LEN;
    for _ in 0..header.qdcount {
        let (question, len) = decode_question(&packet[offset..])?;
        questions.push(question);
        offset += len;
    }
    for _ in 0..header.ancount {
        let (answer, len) = decode_answer(&packet[offset..])?;
        answers.push(answer);
        offset += len;
    }

    Ok(Packet {
        header,
        questions,
        answers,
    })
}

pub fn encode_packet(packet: &Packet) -> Result<Vec<u8>, EncodeError> {
    let mut out = encode_header(&packet.header).to_vec();
    for question in &packet.questions {
        out.extend(encode_question(question)?);
    }
    for answer in &packet.answers {
        out.extend(encode_answer(answer)?);
    }
    Ok(out)
}
