/// Decides whether a queried name is refused locally.
///
/// Shared by every in-flight query, so implementations must be safe for
/// concurrent reads.
pub trait BlacklistPolicy: Send + Sync {
    /// True when `name` equals a blacklisted entry or is a subdomain of one.
    fn is_blacklisted(&self, name: &str) -> bool;
}
