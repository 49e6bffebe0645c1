//! Runtime-mutable configuration sections.
//!
//! The management API edits rule lists and blocklist sources while the
//! server runs; those edits are persisted back into the config file.

use crate::config::Config;
use crate::name::{normalize_name, normalize_suffix};
use std::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Domain,
    Suffix,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Suffix => "suffix",
        }
    }

    /// Stored form of a rule entry of this kind.
    pub fn normalize(self, entry: &str) -> String {
        match self {
            Self::Domain => normalize_name(entry),
            Self::Suffix => normalize_suffix(entry),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutableSnapshot {
    pub domains: Vec<String>,
    pub suffixes: Vec<String>,
    pub blocklist_urls: Vec<String>,
}

impl MutableSnapshot {
    pub fn rules(&self, kind: RuleKind) -> &[String] {
        match kind {
            RuleKind::Domain => &self.domains,
            RuleKind::Suffix => &self.suffixes,
        }
    }

    /// Returns `false` when the entry was already present.
    pub fn add_rule(&mut self, kind: RuleKind, entry: &str) -> bool {
        push_unique(list_mut(self, kind), kind.normalize(entry))
    }

    /// Returns `false` when the entry was not present.
    pub fn remove_rule(&mut self, kind: RuleKind, entry: &str) -> bool {
        let entry = kind.normalize(entry);
        let list = list_mut(self, kind);
        let before = list.len();
        list.retain(|existing| *existing != entry);
        list.len() != before
    }
}

/// Shared rule lists and blocklist sources behind one lock.
#[derive(Debug, Default)]
pub struct MutableSections {
    inner: RwLock<MutableSnapshot>,
}

impl MutableSections {
    pub fn new(snapshot: MutableSnapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    /// Seeds the sections from a loaded config, normalizing rule entries.
    pub fn from_config(config: &Config) -> Self {
        let mut snapshot = MutableSnapshot {
            blocklist_urls: config.blocklist.urls.clone(),
            ..Default::default()
        };
        for domain in &config.rules.domains {
            push_unique(&mut snapshot.domains, RuleKind::Domain.normalize(domain));
        }
        for suffix in &config.rules.suffixes {
            push_unique(&mut snapshot.suffixes, RuleKind::Suffix.normalize(suffix));
        }
        Self::new(snapshot)
    }

    pub fn snapshot(&self) -> MutableSnapshot {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn rules(&self, kind: RuleKind) -> Vec<String> {
        self.snapshot().rules(kind).to_vec()
    }

    pub fn add(&self, kind: RuleKind, entry: &str) -> bool {
        self.update(|snapshot| snapshot.add_rule(kind, entry))
    }

    pub fn remove(&self, kind: RuleKind, entry: &str) -> bool {
        self.update(|snapshot| snapshot.remove_rule(kind, entry))
    }

    pub fn set_blocklist_urls(&self, urls: Vec<String>) {
        self.update(|snapshot| snapshot.blocklist_urls = urls);
    }

    /// Runs `f` under the write lock. Changes that must stay in step with
    /// the sections (the live policy set) are applied inside `f`.
    pub fn update<T>(&self, f: impl FnOnce(&mut MutableSnapshot) -> T) -> T {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

fn list_mut(snapshot: &mut MutableSnapshot, kind: RuleKind) -> &mut Vec<String> {
    match kind {
        RuleKind::Domain => &mut snapshot.domains,
        RuleKind::Suffix => &mut snapshot.suffixes,
    }
}

fn push_unique(list: &mut Vec<String>, entry: String) -> bool {
    if list.contains(&entry) {
        return false;
    }
    list.push(entry);
    true
}
