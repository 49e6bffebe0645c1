pub mod add_rules;
pub mod get_rules;
pub mod remove_rules;

pub use add_rules::AddRulesUseCase;
pub use get_rules::GetRulesUseCase;
pub use remove_rules::RemoveRulesUseCase;

/// Outcome of a batch rule mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleChangeReport {
    /// One line per skipped entry (`domain x exist`, `suffix y not found`).
    pub messages: Vec<String>,
    pub changed: usize,
}

impl RuleChangeReport {
    /// Plain-text reply: the skip messages followed by `ok`.
    pub fn to_text(&self) -> String {
        let mut body = String::new();
        for message in &self.messages {
            body.push_str(message);
            body.push('\n');
        }
        body.push_str("ok");
        body
    }
}

/// Non-empty trimmed lines of a request body.
pub fn parse_entries(body: &str) -> Vec<&str> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
