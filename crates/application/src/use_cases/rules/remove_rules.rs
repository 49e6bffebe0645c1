use super::RuleChangeReport;
use crate::ports::{ConfigStore, PolicyPort};
use dnsbox_domain::{MutableSections, RuleKind};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct RemoveRulesUseCase {
    policy: Arc<dyn PolicyPort>,
    sections: Arc<MutableSections>,
    store: Arc<dyn ConfigStore>,
}

impl RemoveRulesUseCase {
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

    #[instrument(skip(self, kind, entries), fields(kind = kind.as_str(), count = entries.len()))]
    pub async fn execute(&self, kind: RuleKind, entries: &[&str]) -> RuleChangeReport {
        // Sections lock is held across the policy change so the live set and
        // the persisted lists never diverge.
        let report = self.sections.update(|rules| {
            let mut report = RuleChangeReport::default();
            for entry in entries {
                if !self.policy.remove(kind, entry) {
                    report
                        .messages
                        .push(format!("{} {} not found", kind.as_str(), entry));
                    continue;
                }
                rules.remove_rule(kind, entry);
                report.changed += 1;
            }
            report
        });

        if report.changed > 0 {
            info!(removed = report.changed, "Rules removed");
            if let Err(e) = self.store.save(&self.sections).await {
                warn!(error = %e, "Failed to persist rules");
            }
        }

        report
    }
}
