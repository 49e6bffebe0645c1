pub mod codec;
pub mod key;
pub mod storage;

pub use key::cache_key;
pub use storage::ResponseCache;
