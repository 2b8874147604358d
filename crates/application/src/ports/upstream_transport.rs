use async_trait::async_trait;
use sieve_dns_domain::DomainError;

#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    /// Sends `request` unmodified and returns the first reply datagram verbatim.
    async fn forward(&self, request: &[u8]) -> Result<Vec<u8>, DomainError>;

    /// Human-readable upstream identity for logs.
    fn describe(&self) -> String;
}
