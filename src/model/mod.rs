pub mod fantasy;
pub mod golfer;
pub mod metrics;
pub mod saved;

pub use fantasy::*;
pub use golfer::*;
pub use metrics::*;
pub use saved::*;
