pub mod manager;
pub mod parser;
pub mod source;

pub use manager::{BlocklistManager, BlocklistState};
pub use parser::{parse_hosts_line, parse_hosts_text};
pub use source::fetch_source;
