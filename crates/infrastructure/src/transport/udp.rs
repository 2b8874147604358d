//! UDP transport to the upstream resolver (RFC 1035 §4.2.1)
//!
//! The query is relayed exactly as the client sent it and the first reply
//! datagram is handed back untouched. One attempt per query; the client's
//! own retry covers loss.

use async_trait::async_trait;
use sieve_dns_application::ports::UpstreamTransport;
use sieve_dns_domain::{DomainError, UpstreamAddr};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    upstream: UpstreamAddr,
    timeout: Duration,
}

impl UdpTransport {
    pub fn new(upstream: UpstreamAddr, timeout: Duration) -> Self {
        Self { upstream, timeout }
    }

    pub fn upstream(&self) -> &UpstreamAddr {
        &self.upstream
    }

    async fn resolve(&self) -> Result<SocketAddr, DomainError> {
        let (hostname, port) = match &self.upstream {
            UpstreamAddr::Resolved(addr) => return Ok(*addr),
            UpstreamAddr::Unresolved { hostname, port } => (hostname.as_ref(), *port),
        };

        let lookup = tokio::net::lookup_host((hostname, port));
        let mut addrs = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.transport_error(format!("resolution failed: {}", e)))?;

        addrs
            .next()
            .ok_or_else(|| self.transport_error("no addresses found".to_string()))
    }

    fn transport_error(&self, reason: String) -> DomainError {
        DomainError::Transport {
            server: self.upstream.to_string(),
            reason,
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.upstream.to_string(),
        }
    }
}

#[async_trait]
impl UpstreamTransport for UdpTransport {
    async fn forward(&self, request: &[u8]) -> Result<Vec<u8>, DomainError> {
        let server_addr = self.resolve().await?;

        let bind_addr = if server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.transport_error(format!("failed to bind UDP socket: {}", e)))?;

        // Connected sockets drop datagrams from any other source.
        socket
            .connect(server_addr)
            .await
            .map_err(|e| self.transport_error(format!("failed to connect: {}", e)))?;

        let bytes_sent = tokio::time::timeout(self.timeout, socket.send(request))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.transport_error(format!("failed to send: {}", e)))?;

        debug!(server = %server_addr, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = tokio::time::timeout(self.timeout, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.transport_error(format!("failed to receive: {}", e)))?;

        recv_buf.truncate(bytes_received);

        debug!(
            server = %server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(recv_buf)
    }

    fn describe(&self) -> String {
        format!("udp://{}", self.upstream)
    }
}
