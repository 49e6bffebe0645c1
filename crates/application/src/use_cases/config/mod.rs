pub mod persist;

pub use persist::PersistConfigUseCase;
