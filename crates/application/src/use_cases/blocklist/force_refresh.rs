use crate::ports::BlocklistPort;
use dnsbox_domain::DomainError;
use std::sync::Arc;
use tracing::info;

pub struct ForceBlocklistRefreshUseCase {
    blocklist: Option<Arc<dyn BlocklistPort>>,
}

impl ForceBlocklistRefreshUseCase {
    pub fn new(blocklist: Option<Arc<dyn BlocklistPort>>) -> Self {
        Self { blocklist }
    }

    pub fn execute(&self) -> Result<(), DomainError> {
        let blocklist = self
            .blocklist
            .as_ref()
            .ok_or_else(|| DomainError::NotFound("blocklist is disabled".to_string()))?;
        blocklist.force_refresh();
        info!("Blocklist refresh requested");
        Ok(())
    }
}
