use super::evaluate_policy::{evaluate_policy, PolicyOutcome};
use crate::ports::{BlacklistPolicy, UpstreamTransport};
use sieve_dns_domain::wire::{decode_request, encode_packet};
use sieve_dns_domain::{DomainError, RecordType};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Which branch produced the reply bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Rejected(Vec<u8>),
    Forwarded(Vec<u8>),
}

impl DispatchOutcome {
    pub fn bytes(&self) -> &[u8] {
        match self {
            DispatchOutcome::Rejected(bytes) | DispatchOutcome::Forwarded(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            DispatchOutcome::Rejected(bytes) | DispatchOutcome::Forwarded(bytes) => bytes,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, DispatchOutcome::Rejected(_))
    }
}

/// Turns one raw query into the bytes to send back, if any.
///
/// Stateless per call; one instance is shared by every in-flight datagram.
pub struct HandleDnsPacketUseCase {
    blacklist: Arc<dyn BlacklistPolicy>,
    upstream: Arc<dyn UpstreamTransport>,
}

impl HandleDnsPacketUseCase {
    pub fn new(blacklist: Arc<dyn BlacklistPolicy>, upstream: Arc<dyn UpstreamTransport>) -> Self {
        Self {
            blacklist,
            upstream,
        }
    }

    pub async fn execute(&self, raw: &[u8]) -> Result<DispatchOutcome, DomainError> {
        let start = Instant::now();
        let request = decode_request(raw)?;
        let domain = &request.question.qname;
        let record_type = RecordType::from(request.question.qtype);

        match evaluate_policy(&request, self.blacklist.as_ref()) {
            PolicyOutcome::Reject(packet) => {
                info!(domain = %domain, record_type = %record_type, id = request.header.id, "Blacklisted domain refused");
                Ok(DispatchOutcome::Rejected(encode_packet(&packet)?))
            }
            PolicyOutcome::Forward => {
                debug!(domain = %domain, record_type = %record_type, upstream = %self.upstream.describe(), "Forwarding query");
                let reply = self.upstream.forward(raw).await?;
                debug!(
                    domain = %domain,
                    bytes = reply.len(),
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Upstream reply relayed"
                );
                Ok(DispatchOutcome::Forwarded(reply))
            }
        }
    }

    /// Like [`execute`](Self::execute), but failures become `None`: the query
    /// is dropped silently and the client's own retry takes over.
    pub async fn handle(&self, raw: &[u8]) -> Option<Vec<u8>> {
        match self.execute(raw).await {
            Ok(outcome) => Some(outcome.into_bytes()),
            Err(e) => {
                warn!(error = %e, bytes = raw.len(), "Dropping query");
                None
            }
        }
    }
}
