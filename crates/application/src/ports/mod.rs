mod blacklist_policy;
mod upstream_transport;

pub use blacklist_policy::BlacklistPolicy;
pub use upstream_transport::UpstreamTransport;
