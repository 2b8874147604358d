use super::DomainBlacklist;
use sieve_dns_domain::DomainError;
use std::path::PathBuf;
use tracing::{debug, info};

/// Extracts the domain from one blacklist file line.
///
/// Accepts a bare domain or a hosts-file line (`0.0.0.0 ads.example.com`).
/// Blank lines and `#` comments yield `None`.
pub fn parse_list_line(line: &str) -> Option<&str> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return None;
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [domain] => Some(*domain),
        [addr, domain, ..] if matches!(*addr, "0.0.0.0" | "127.0.0.1" | "::" | "::1") => {
            if matches!(*domain, "localhost" | "broadcasthost" | "ip6-localhost" | "ip6-loopback") {
                return None;
            }
            Some(*domain)
        }
        _ => None,
    }
}

/// Builds the blacklist from inline config entries plus list files.
pub fn load_blacklist(inline: &[String], files: &[PathBuf]) -> Result<DomainBlacklist, DomainError> {
    let mut blacklist = DomainBlacklist::from_entries(inline);

    for path in files {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Blacklist(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let before = blacklist.len();
        for domain in text.lines().filter_map(parse_list_line) {
            blacklist.insert(domain);
        }
        debug!(
            path = %path.display(),
            added = blacklist.len() - before,
            "Loaded blacklist file"
        );
    }

    info!(
        entries = blacklist.len(),
        files = files.len(),
        "Blacklist loaded"
    );
    Ok(blacklist)
}
