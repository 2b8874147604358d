use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BlockingConfig {
    /// Domains refused locally, together with all their subdomains.
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Extra one-domain-per-line files merged into `blacklist`.
    #[serde(default)]
    pub blacklist_files: Vec<PathBuf>,
}
