#![allow(dead_code)]
use sieve_dns_domain::{Header, Packet, Question, Request, ResourceRecord};

/// Query for `www.northeastern.edu` A/IN, captured with tcpdump.
pub const NORTHEASTERN_QUERY: &str =
    "db42 0100 0001 0000 0000 0000 0377 7777 0c6e 6f72 7468 6561 7374 6572 6e03 6564 7500 0001 0001";

/// Upstream reply to [`NORTHEASTERN_QUERY`]; the answer name is a pointer to offset 12.
pub const NORTHEASTERN_REPLY: &str = "db42 8180 0001 0001 0000 0000 0377 7777 0c6e 6f72 7468 6561 7374 6572 6e03 6564 7500 0001 0001 c00c 0001 0001 0000 0258 0004 9b21 1144";

/// Parses whitespace-separated hex into bytes.
pub fn hex(s: &str) -> Vec<u8> {
    let digits: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    digits
        .chunks(2)
        .map(|pair| u8::from_str_radix(std::str::from_utf8(pair).unwrap(), 16).unwrap())
        .collect()
}

pub struct HeaderBuilder {
    header: Header,
}

impl HeaderBuilder {
    pub fn query(id: u16) -> Self {
        Self {
            header: Header {
                id,
                rd: true,
                qdcount: 1,
                ..Header::default()
            },
        }
    }

    pub fn response(id: u16) -> Self {
        Self::query(id).qr(true).ra(true)
    }

    pub fn qr(mut self, qr: bool) -> Self {
        self.header.qr = qr;
        self
    }

    pub fn ra(mut self, ra: bool) -> Self {
        self.header.ra = ra;
        self
    }

    pub fn opcode(mut self, opcode: u8) -> Self {
        self.header.opcode = opcode;
        self
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.header.rcode = rcode;
        self
    }

    pub fn counts(mut self, qd: u16, an: u16, ns: u16, ar: u16) -> Self {
        self.header.qdcount = qd;
        self.header.ancount = an;
        self.header.nscount = ns;
        self.header.arcount = ar;
        self
    }

    pub fn build(self) -> Header {
        self.header
    }
}

pub fn question(name: &str, qtype: u16) -> Question {
    Question {
        qname: name.to_string(),
        qtype,
        qclass: 1,
    }
}

pub fn a_record(name: &str, ip: [u8; 4], ttl: u32) -> ResourceRecord {
    ResourceRecord {
        name: name.to_string(),
        rtype: 1,
        rclass: 1,
        ttl,
        rdata: ip.to_vec(),
    }
}

pub fn request(id: u16, name: &str) -> Request {
    Request {
        header: HeaderBuilder::query(id).build(),
        question: question(name, 1),
    }
}

/// Packet whose header counts match its sections.
pub fn packet(header: Header, questions: Vec<Question>, answers: Vec<ResourceRecord>) -> Packet {
    let header = Header {
        qdcount: questions.len() as u16,
        ancount: answers.len() as u16,
        ..header
    };
    Packet {
        header,
        questions,
        answers,
    }
}
