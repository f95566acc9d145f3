pub mod config;
pub mod types;
pub mod validation;

pub use config::load_config;
pub use types::{Cli, CleanArgs, Command, Mode, ProviderConfig, ServerConfig};
