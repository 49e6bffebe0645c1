pub mod force_refresh;
pub mod get_status;
pub mod update_sources;

pub use force_refresh::ForceBlocklistRefreshUseCase;
pub use get_status::GetBlocklistStatusUseCase;
pub use update_sources::UpdateBlocklistSourcesUseCase;
