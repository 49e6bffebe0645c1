use dnsbox_domain::RuleKind;

/// Live static rule set consulted by the query handler.
///
/// All methods are synchronous; implementations keep the set in memory and
/// normalize names (lowercase, no trailing dot) before matching.
pub trait PolicyPort: Send + Sync {
    /// Returns `false` if the entry was already present.
    fn add(&self, kind: RuleKind, entry: &str) -> bool;

    /// Returns `false` if the entry was not present.
    fn remove(&self, kind: RuleKind, entry: &str) -> bool;

    /// Whether the exact rule entry is stored.
    fn contains(&self, kind: RuleKind, entry: &str) -> bool;

    /// Whether `name` is an exact rule or falls under a suffix rule.
    fn should_process(&self, name: &str) -> bool;
}
