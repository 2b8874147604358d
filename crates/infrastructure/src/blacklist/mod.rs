mod loader;
mod suffix_trie;

pub use loader::{load_blacklist, parse_list_line};

use sieve_dns_application::ports::BlacklistPolicy;
use suffix_trie::SuffixTrie;

/// Set of blacklisted domains; each entry also covers all of its subdomains.
#[derive(Default)]
pub struct DomainBlacklist {
    trie: SuffixTrie,
    len: usize,
}

impl DomainBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut blacklist = Self::new();
        for entry in entries {
            blacklist.insert(entry.as_ref());
        }
        blacklist
    }

    /// Returns false when the entry is empty or already present.
    pub fn insert(&mut self, entry: &str) -> bool {
        let domain = normalize(entry);
        if domain.is_empty() {
            return false;
        }
        let added = self.trie.insert(&domain);
        if added {
            self.len += 1;
        }
        added
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl BlacklistPolicy for DomainBlacklist {
    fn is_blacklisted(&self, name: &str) -> bool {
        let domain = normalize(name);
        !domain.is_empty() && self.trie.matches(&domain)
    }
}

fn normalize(name: &str) -> String {
    let name = name.trim();
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}
