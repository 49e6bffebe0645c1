use compact_str::CompactString;
use dnsbox_domain::normalize_suffix;
use rustc_hash::FxHashSet;
use std::borrow::Cow;

/// Membership store for exact names and dot-prefixed suffixes.
///
/// Both kinds share one hash set: an exact entry never starts with `.`, a
/// suffix entry always does. Lookups normalize the queried name (lowercase,
/// no trailing root dot) without allocating when it is already normalized.
#[derive(Debug, Default, Clone)]
pub struct PolicySet {
    entries: FxHashSet<CompactString>,
}

impl PolicySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn from_rules<D, S>(domains: &[D], suffixes: &[S]) -> Self
    where
        D: AsRef<str>,
        S: AsRef<str>,
    {
        let mut set = Self::with_capacity(domains.len() + suffixes.len());
        for domain in domains {
            set.add_domain(domain.as_ref());
        }
        for suffix in suffixes {
            set.add_suffix(suffix.as_ref());
        }
        set
    }

    /// Returns `false` if the name was already present or is empty.
    pub fn add_domain(&mut self, name: &str) -> bool {
        let name = normalized(name);
        if name.is_empty() {
            return false;
        }
        self.entries.insert(CompactString::from(name.as_ref()))
    }

    /// Stores `name` dot-prefixed. Returns `false` if already present.
    pub fn add_suffix(&mut self, name: &str) -> bool {
        let suffix = normalize_suffix(name);
        if suffix.len() < 2 {
            return false;
        }
        self.entries.insert(CompactString::from(suffix))
    }

    /// Removes an entry in its stored form (`example.org` or `.example.com`).
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(normalized(name).as_ref())
    }

    pub fn contains_exact(&self, name: &str) -> bool {
        self.entries.contains(normalized(name).as_ref())
    }

    /// Collapses `name` to its last two labels and looks up the dot-prefixed
    /// result: `a.b.example.com` tests `.example.com`.
    pub fn contains_suffix(&self, name: &str) -> bool {
        let name = normalized(name);
        let registrable = match name.rmatch_indices('.').nth(1) {
            Some((idx, _)) => &name[idx + 1..],
            None => name.as_ref(),
        };
        let mut key = CompactString::with_capacity(registrable.len() + 1);
        key.push('.');
        key.push_str(registrable);
        self.entries.contains(&key)
    }

    /// Exact match, or any suffix candidate of at least two labels.
    ///
    /// For `a.b.example.com` the candidates are `.a.b.example.com`,
    /// `.b.example.com` and `.example.com`; a single-label name has none.
    pub fn should_process(&self, name: &str) -> bool {
        let name = normalized(name);
        self.entries.contains(name.as_ref()) || self.matches_suffix_candidates(&name)
    }

    /// Blocklist semantics: the name or one of its parents (down to two
    /// labels) is an exact entry, or a suffix candidate matches.
    pub fn matches_hierarchy(&self, name: &str) -> bool {
        let name = normalized(name);
        if self.entries.contains(name.as_ref()) {
            return true;
        }

        for (idx, _) in name.match_indices('.') {
            let parent = &name[idx + 1..];
            if !parent.contains('.') {
                break;
            }
            if self.entries.contains(parent) {
                return true;
            }
        }

        self.matches_suffix_candidates(&name)
    }

    fn matches_suffix_candidates(&self, name: &str) -> bool {
        let mut dotted = CompactString::with_capacity(name.len() + 1);
        dotted.push('.');
        dotted.push_str(name);

        for (idx, _) in dotted.match_indices('.') {
            let candidate = &dotted[idx..];
            if !candidate[1..].contains('.') {
                break;
            }
            if self.entries.contains(candidate) {
                return true;
            }
        }
        false
    }

    pub fn domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = self
            .entries
            .iter()
            .filter(|e| !e.starts_with('.'))
            .map(|e| e.to_string())
            .collect();
        domains.sort_unstable();
        domains
    }

    pub fn suffixes(&self) -> Vec<String> {
        let mut suffixes: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.starts_with('.'))
            .map(|e| e.to_string())
            .collect();
        suffixes.sort_unstable();
        suffixes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalized(name: &str) -> Cow<'_, str> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(trimmed.to_ascii_lowercase())
    } else {
        Cow::Borrowed(trimmed)
    }
}
