use compact_str::CompactString;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Default)]
struct TrieNode {
    children: HashMap<CompactString, TrieNode, FxBuildHasher>,
    terminal: bool,
}

/// Domains keyed by reversed labels, so `ads.example.com` lives under
/// `com -> example -> ads`.
#[derive(Default)]
pub(super) struct SuffixTrie {
    root: TrieNode,
}

impl SuffixTrie {
    pub(super) fn insert(&mut self, domain: &str) -> bool {
        let mut node = &mut self.root;
        for label in domain.split('.').rev() {
            node = node.children.entry(CompactString::new(label)).or_default();
        }
        !std::mem::replace(&mut node.terminal, true)
    }

    /// True if `domain` or one of its parent domains was inserted.
    #[inline]
    pub(super) fn matches(&self, domain: &str) -> bool {
        let labels: SmallVec<[&str; 8]> = domain.split('.').rev().collect();
        let mut node = &self.root;

        for label in labels {
            match node.children.get(label) {
                Some(child) if child.terminal => return true,
                Some(child) => node = child,
                None => return false,
            }
        }

        false
    }
}
