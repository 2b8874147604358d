use crate::ports::BlacklistPolicy;
use sieve_dns_domain::wire::RCODE_REFUSED;
use sieve_dns_domain::{Packet, Request};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOutcome {
    /// Relay the original bytes upstream; nothing is re-encoded.
    Forward,
    /// Answer locally with this packet.
    Reject(Packet),
}

pub fn evaluate_policy(request: &Request, blacklist: &dyn BlacklistPolicy) -> PolicyOutcome {
    if blacklist.is_blacklisted(&request.question.qname) {
        PolicyOutcome::Reject(reject_response(request))
    } else {
        PolicyOutcome::Forward
    }
}

/// Builds the REFUSED reply for `request`: same id, opcode and flags, `qr`
/// set, no answers, the question echoed back unchanged.
pub fn reject_response(request: &Request) -> Packet {
    let mut header = request.header;
    header.qr = true;
    // qdcount, nscount and arcount stay as received; only the answer count is reset.
    header.ancount = 0;
    header.rcode = RCODE_REFUSED;

    Packet {
        header,
        questions: vec![request.question.clone()],
        answers: Vec::new(),
    }
}
