use crate::upstream::UpstreamAddr;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Resolver address, e.g. `8.8.8.8`, `1.1.1.1:53` or `udp://dns.example:53`.
    #[serde(default = "default_nameserver")]
    pub nameserver: String,

    /// Per send and per receive, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn addr(&self) -> Result<UpstreamAddr, String> {
        self.nameserver.parse()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            nameserver: default_nameserver(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_nameserver() -> String {
    "8.8.8.8:53".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}
