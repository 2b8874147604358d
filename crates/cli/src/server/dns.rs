use sieve_dns_application::use_cases::HandleDnsPacketUseCase;
use sieve_dns_domain::wire::MAX_UDP_PACKET;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};

pub fn bind_dns_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = create_udp_socket(domain, socket_addr)?;
    info!(bind_address = %socket.local_addr()?, "DNS server listening");
    Ok(socket)
}

/// Receive loop: every datagram is handled on its own task so a slow
/// upstream never blocks the next client.
pub async fn serve(
    socket: UdpSocket,
    handler: Arc<HandleDnsPacketUseCase>,
) -> anyhow::Result<()> {
    let socket = Arc::new(socket);
    let mut recv_buf = [0u8; MAX_UDP_PACKET];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let handler = handler.clone();
        let socket = socket.clone();
        let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        tokio::spawn(async move {
            if let Some(response) = handler.handle(&owned_buf).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    debug!(client = %from, error = %e, "Failed to send reply");
                }
            }
        });
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sieve_dns_application::ports::{BlacklistPolicy, UpstreamTransport};
    use sieve_dns_domain::wire::{decode_packet, encode_request, Header, Question, Request};
    use sieve_dns_domain::DomainError;
    use std::net::Ipv6Addr;
    use std::time::Duration;

    struct Blocks(&'static str);

    impl BlacklistPolicy for Blocks {
        fn is_blacklisted(&self, name: &str) -> bool {
            name == self.0
        }
    }

    struct Echo;

    #[async_trait]
    impl UpstreamTransport for Echo {
        async fn forward(&self, request: &[u8]) -> Result<Vec<u8>, DomainError> {
            Ok(request.to_vec())
        }

        fn describe(&self) -> String {
            "echo".to_string()
        }
    }

    fn query(id: u16, name: &str) -> Vec<u8> {
        encode_request(&Request {
            header: Header {
                id,
                rd: true,
                qdcount: 1,
                ..Header::default()
            },
            question: Question {
                qname: name.to_string(),
                qtype: 1,
                qclass: 1,
            },
        })
        .unwrap()
    }

    async fn start_server() -> SocketAddr {
        let socket = bind_dns_socket(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
        let addr = socket.local_addr().unwrap();
        let handler = Arc::new(HandleDnsPacketUseCase::new(
            Arc::new(Blocks("blocked.test")),
            Arc::new(Echo),
        ));
        tokio::spawn(serve(socket, handler));
        addr
    }

    async fn exchange(server: SocketAddr, datagram: &[u8]) -> Option<Vec<u8>> {
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(datagram, server).await.unwrap();

        let mut buf = [0u8; 1024];
        match tokio::time::timeout(Duration::from_millis(300), client.recv_from(&mut buf)).await {
            Ok(Ok((n, _))) => Some(buf[..n].to_vec()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_blacklisted_query_refused_over_udp() {
        let server = start_server().await;

        let reply = exchange(server, &query(77, "blocked.test")).await.unwrap();
        let packet = decode_packet(&reply).unwrap();

        assert_eq!(packet.header.id, 77);
        assert_eq!(packet.header.rcode, 5);
    }

    #[tokio::test]
    async fn test_allowed_query_relayed_over_udp() {
        let server = start_server().await;
        let raw = query(78, "open.test");

        assert_eq!(exchange(server, &raw).await, Some(raw));
    }

    #[tokio::test]
    async fn test_malformed_datagram_gets_no_reply() {
        let server = start_server().await;

        assert_eq!(exchange(server, &[1, 2, 3]).await, None);
        // The loop keeps serving after a dropped datagram.
        assert!(exchange(server, &query(79, "open.test")).await.is_some());
    }

    #[tokio::test]
    async fn test_ipv6_bind_is_dual_stack() {
        // Hosts with IPv6 disabled cannot bind `::` at all.
        let Ok(socket) = bind_dns_socket(SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))) else {
            return;
        };
        let addr = socket.local_addr().unwrap();
        assert!(addr.is_ipv6());

        let handler = Arc::new(HandleDnsPacketUseCase::new(
            Arc::new(Blocks("blocked.test")),
            Arc::new(Echo),
        ));
        tokio::spawn(serve(socket, handler));

        // An IPv4 client reaches the wildcard IPv6 socket through a mapped address.
        let v4_target = SocketAddr::from(([127, 0, 0, 1], addr.port()));
        let reply = exchange(v4_target, &query(80, "blocked.test")).await.unwrap();
        assert_eq!(decode_packet(&reply).unwrap().header.rcode, 5);
    }
}
