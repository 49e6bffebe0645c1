pub mod config;
pub mod ipset;
pub mod logging;
pub mod signal;

pub use config::load_config;
pub use ipset::init_ip_sets;
pub use logging::init_logging;
pub use signal::wait_for_shutdown_signal;
