use anyhow::Context;
use sieve_dns_application::use_cases::HandleDnsPacketUseCase;
use sieve_dns_domain::{Config, DomainError};
use sieve_dns_infrastructure::{load_blacklist, UdpTransport};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler_use_case: Arc<HandleDnsPacketUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let blacklist = load_blacklist(&config.blocking.blacklist, &config.blocking.blacklist_files)
            .context("Failed to load blacklist")?;

        let upstream_addr = config
            .upstream
            .addr()
            .map_err(DomainError::InvalidUpstream)?;

        info!(
            upstream = %upstream_addr,
            timeout_ms = config.upstream.timeout_ms,
            blacklisted = blacklist.len(),
            "Initializing DNS services"
        );

        let upstream = UdpTransport::new(upstream_addr, config.upstream.timeout());

        Ok(Self {
            handler_use_case: Arc::new(HandleDnsPacketUseCase::new(
                Arc::new(blacklist),
                Arc::new(upstream),
            )),
        })
    }
}
