pub mod constraints;
pub mod lineup;

pub use constraints::{LineupConstraints, MAX_LINEUPS, Site};
pub use lineup::{exposure, generate_lineups_with, generate_optimal_lineups};
