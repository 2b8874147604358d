use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl ServerConfig {
    /// Listening address. `bind_address` is a bare IP; `[::]` is accepted too.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let ip = self.bind_address.trim();
        let ip = ip
            .strip_prefix('[')
            .and_then(|ip| ip.strip_suffix(']'))
            .unwrap_or(ip);
        ip.parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.dns_port))
            .map_err(|_| format!("Invalid bind address '{}'", self.bind_address))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
        }
    }
}

fn default_dns_port() -> u16 {
    5300
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
