//! Sieve DNS Infrastructure Layer
pub mod blacklist;
pub mod transport;

pub use blacklist::{load_blacklist, DomainBlacklist};
pub use transport::udp::UdpTransport;
