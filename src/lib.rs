pub mod args;
pub mod cache;
pub mod error;
pub mod model;
pub mod odds;
pub mod optimizer;
pub mod provider;
pub mod server;
pub mod simulation;

pub use error::CoreError;
