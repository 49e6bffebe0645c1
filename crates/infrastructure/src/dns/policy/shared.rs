use super::PolicySet;
use dnsbox_application::ports::PolicyPort;
use dnsbox_domain::RuleKind;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Static rules shared between the query handler and the management API.
///
/// Reads vastly outnumber writes; the lock is only held for a single
/// membership test or insertion.
#[derive(Debug, Default)]
pub struct SharedPolicySet {
    inner: RwLock<PolicySet>,
}

impl SharedPolicySet {
    pub fn new(set: PolicySet) -> Self {
        Self {
            inner: RwLock::new(set),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, PolicySet> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, PolicySet> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PolicyPort for SharedPolicySet {
    fn add(&self, kind: RuleKind, entry: &str) -> bool {
        match kind {
            RuleKind::Domain => self.write().add_domain(entry),
            RuleKind::Suffix => self.write().add_suffix(entry),
        }
    }

    fn remove(&self, kind: RuleKind, entry: &str) -> bool {
        self.write().remove(&kind.normalize(entry))
    }

    fn contains(&self, kind: RuleKind, entry: &str) -> bool {
        self.read().contains_exact(&kind.normalize(entry))
    }

    fn should_process(&self, name: &str) -> bool {
        self.read().should_process(name)
    }
}
