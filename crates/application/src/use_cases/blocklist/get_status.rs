use crate::ports::BlocklistPort;
use dnsbox_domain::BlocklistStatus;
use std::sync::Arc;

pub struct GetBlocklistStatusUseCase {
    blocklist: Option<Arc<dyn BlocklistPort>>,
}

impl GetBlocklistStatusUseCase {
    pub fn new(blocklist: Option<Arc<dyn BlocklistPort>>) -> Self {
        Self { blocklist }
    }

    /// `None` when the blocklist is disabled.
    pub fn execute(&self) -> Option<BlocklistStatus> {
        self.blocklist.as_ref().map(|b| b.status())
    }
}
