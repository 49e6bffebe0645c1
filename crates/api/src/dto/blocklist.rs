use dnsbox_domain::BlocklistStatus;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Default)]
pub struct BlocklistStatusResponse {
    pub enabled: bool,
    /// RFC 3339, absent until the first refresh completes.
    pub last_refreshed_at: Option<String>,
    pub domain_count: usize,
    pub sources: Vec<String>,
}

impl From<Option<BlocklistStatus>> for BlocklistStatusResponse {
    fn from(status: Option<BlocklistStatus>) -> Self {
        match status {
            Some(status) => Self {
                enabled: true,
                last_refreshed_at: status.last_refreshed_at.map(|at| at.to_rfc3339()),
                domain_count: status.domain_count,
                sources: status.sources,
            },
            None => Self::default(),
        }
    }
}
