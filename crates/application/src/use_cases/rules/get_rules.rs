use dnsbox_domain::{MutableSections, RuleKind};
use std::sync::Arc;

pub struct GetRulesUseCase {
    sections: Arc<MutableSections>,
}

impl GetRulesUseCase {
    pub fn new(sections: Arc<MutableSections>) -> Self {
        Self { sections }
    }

    pub fn execute(&self, kind: RuleKind) -> Vec<String> {
        self.sections.rules(kind)
    }
}
