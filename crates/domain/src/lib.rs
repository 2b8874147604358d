//! Sieve DNS Domain Layer
pub mod config;
pub mod errors;
pub mod upstream;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::{DecodeError, DomainError, EncodeError};
pub use upstream::UpstreamAddr;
pub use wire::{Header, Packet, Question, RecordType, Request, ResourceRecord, Response};
