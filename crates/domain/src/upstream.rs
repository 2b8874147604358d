use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// The resolver non-blacklisted queries are relayed to.
///
/// Hostnames are kept unresolved; the transport looks them up when it sends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAddr::Resolved(addr) => write!(f, "{}", addr),
            UpstreamAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    if s.starts_with('[') {
        let end = s.find(']')?;
        let host = &s[1..end];
        let rest = &s[end + 1..];
        let port_str = rest.strip_prefix(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    } else {
        let (host, port_str) = s.rsplit_once(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    }
}

fn is_valid_hostname(host: &str) -> bool {
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

impl FromStr for UpstreamAddr {
    type Err = String;

    /// Accepts `udp://HOST:PORT`, `IP:PORT`, `[IPv6]:PORT`, a bare IP or a bare
    /// hostname. A missing port means 53.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let addr_str = s.strip_prefix("udp://").unwrap_or(s);

        if addr_str.is_empty() {
            return Err("Upstream address is empty".to_string());
        }
        if let Ok(addr) = addr_str.parse::<SocketAddr>() {
            return Ok(UpstreamAddr::Resolved(addr));
        }
        if let Ok(ip) = addr_str.parse::<IpAddr>() {
            return Ok(UpstreamAddr::Resolved(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
        }
        if let Some((host, port)) = parse_host_port(addr_str) {
            if let Ok(ip) = host.parse::<IpAddr>() {
                return Ok(UpstreamAddr::Resolved(SocketAddr::new(ip, port)));
            }
            if is_valid_hostname(host) {
                return Ok(UpstreamAddr::Unresolved {
                    hostname: host.into(),
                    port,
                });
            }
        } else if is_valid_hostname(addr_str) {
            return Ok(UpstreamAddr::Unresolved {
                hostname: addr_str.into(),
                port: DEFAULT_DNS_PORT,
            });
        }

        Err(format!(
            "Invalid upstream '{}'. Expected: udp://HOST:PORT, IP:PORT, IP or HOSTNAME",
            s
        ))
    }
}
