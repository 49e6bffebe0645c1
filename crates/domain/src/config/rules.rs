use serde::{Deserialize, Serialize};

/// Static policy rules. Names matching them have their answers pushed into
/// the configured IP sets.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub domains: Vec<String>,

    /// Suffix rules, stored dot-prefixed (`.example.com`).
    #[serde(default)]
    pub suffixes: Vec<String>,
}
