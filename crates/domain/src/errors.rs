use thiserror::Error;

/// Failure while reading a wire-format message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Truncated message: needed {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("Compression pointer to offset {offset} is outside the message")]
    PointerOutOfBounds { offset: usize },

    #[error("Compression pointer loop at offset {offset}")]
    PointerLoop { offset: usize },
}

/// Failure while writing a wire-format message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Label '{label}' is {len} bytes long (max 191)")]
    LabelTooLong { label: String, len: usize },

    #[error("RDATA is {len} bytes long (max 65535)")]
    RdataTooLong { len: usize },
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Failed to decode DNS message: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to encode DNS message: {0}")]
    Encode(#[from] EncodeError),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Invalid upstream address: {0}")]
    InvalidUpstream(String),

    #[error("Blacklist error: {0}")]
    Blacklist(String),
}
