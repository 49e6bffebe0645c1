pub mod blocklist_refresh;
pub mod runner;

pub use blocklist_refresh::BlocklistRefreshJob;
pub use runner::JobRunner;
