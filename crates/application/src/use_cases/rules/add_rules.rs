use super::RuleChangeReport;
use crate::ports::{ConfigStore, PolicyPort};
use dnsbox_domain::{MutableSections, RuleKind};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct AddRulesUseCase {
    policy: Arc<dyn PolicyPort>,
    sections: Arc<MutableSections>,
    store: Arc<dyn ConfigStore>,
}

impl AddRulesUseCase {
    pub fn new(
        policy: Arc<dyn PolicyPort>,
        sections: Arc<MutableSections>,
        store: Arc<dyn ConfigStore>,
    ) -> Self {
        Self {
            policy,
            sections,
            store,
        }
    }

    /// Adds every entry to the live policy and the persisted rule lists.
    /// Entries already present are reported and skipped.
    #[instrument(skip(self, kind, entries), fields(kind = kind.as_str(), count = entries.len()))]
    pub async fn execute(&self, kind: RuleKind, entries: &[&str]) -> RuleChangeReport {
        // Sections lock is held across the policy change so the live set and
        // the persisted lists never diverge.
        let report = self.sections.update(|rules| {
            let mut report = RuleChangeReport::default();
            for entry in entries {
                if !self.policy.add(kind, entry) {
                    report
                        .messages
                        .push(format!("{} {} exist", kind.as_str(), entry));
                    continue;
                }
                rules.add_rule(kind, entry);
                report.changed += 1;
            }
            report
        });

        if report.changed > 0 {
            info!(added = report.changed, "Rules added");
            if let Err(e) = self.store.save(&self.sections).await {
                warn!(error = %e, "Failed to persist rules");
            }
        }

        report
    }
}
