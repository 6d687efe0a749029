pub mod backend;
pub mod base;

pub use backend::BackendConfig;
pub use base::ClientConfig;
