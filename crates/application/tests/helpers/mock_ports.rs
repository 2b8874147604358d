#![allow(dead_code)]
use async_trait::async_trait;
use sieve_dns_application::ports::{BlacklistPolicy, UpstreamTransport};
use sieve_dns_domain::wire::{encode_request, Header, Question, Request};
use sieve_dns_domain::DomainError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

// ── MockBlacklist ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockBlacklist {
    entries: Arc<RwLock<HashSet<String>>>,
    lookups: Arc<AtomicUsize>,
}

impl MockBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[&str]) -> Self {
        let blacklist = Self::new();
        for entry in entries {
            blacklist.block(entry);
        }
        blacklist
    }

    pub fn block(&self, entry: &str) {
        self.entries.write().unwrap().insert(entry.to_string());
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl BlacklistPolicy for MockBlacklist {
    fn is_blacklisted(&self, name: &str) -> bool {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.entries
            .read()
            .unwrap()
            .iter()
            .any(|entry| name == entry || name.ends_with(&format!(".{}", entry)))
    }
}

// ── MockUpstream ───────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUpstream {
    reply: Arc<RwLock<Vec<u8>>>,
    error: Arc<RwLock<Option<DomainError>>>,
    received: Arc<RwLock<Vec<Vec<u8>>>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(reply: Vec<u8>) -> Self {
        let upstream = Self::new();
        *upstream.reply.write().unwrap() = reply;
        upstream
    }

    pub fn failing(error: DomainError) -> Self {
        let upstream = Self::new();
        *upstream.error.write().unwrap() = Some(error);
        upstream
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.received.read().unwrap().len()
    }
}

#[async_trait]
impl UpstreamTransport for MockUpstream {
    async fn forward(&self, request: &[u8]) -> Result<Vec<u8>, DomainError> {
        self.received.write().unwrap().push(request.to_vec());
        if let Some(err) = self.error.read().unwrap().clone() {
            return Err(err);
        }
        Ok(self.reply.read().unwrap().clone())
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

// ── fixtures ───────────────────────────────────────────────────────────────────

pub fn request_for(id: u16, name: &str) -> Request {
    Request {
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
    }
}

pub fn query_bytes(id: u16, name: &str) -> Vec<u8> {
    encode_request(&request_for(id, name)).unwrap()
}
