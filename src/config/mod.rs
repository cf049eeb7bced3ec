pub mod defaults;
pub mod loader;
pub mod types;

pub use defaults::DEFAULT_SLABS;
pub use loader::{ConfigError, ConfigLoader};
pub use types::*;
