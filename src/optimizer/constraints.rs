use crate::error::CoreError;
use crate::model::FantasyPlayer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound on lineups produced by a single optimizer call.
pub const MAX_LINEUPS: usize = 10;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    DraftKings,
    FanDuel,
}

impl Site {
    #[must_use]
    pub fn roster_size(self) -> usize {
        match self {
            Site::DraftKings | Site::FanDuel => 6,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Site::DraftKings => "draftkings",
            Site::FanDuel => "fanduel",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draftkings" => Ok(Site::DraftKings),
            "fanduel" => Ok(Site::FanDuel),
            _ => Err(CoreError::UnsupportedSite(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineupConstraints {
    pub roster_size: usize,
    pub budget: i64,
}

impl LineupConstraints {
    /// # Errors
    ///
    /// Will return `Err` if the site is not supported
    pub fn for_site(site: &str, budget: i64) -> Result<Self, CoreError> {
        let site = Site::from_str(site)?;
        Ok(Self {
            roster_size: site.roster_size(),
            budget,
        })
    }
}

/// Players that may appear in a lineup: not excluded and with a positive salary.
#[must_use]
pub fn available_players<'a>(
    players: &'a [FantasyPlayer],
    excluded: &[String],
) -> Vec<&'a FantasyPlayer> {
    players
        .iter()
        .filter(|p| !excluded.contains(&p.id))
        .filter(|p| {
            if p.salary > 0 {
                true
            } else {
                tracing::warn!(
                    player = %p.name,
                    salary = p.salary,
                    "dropping player without a salary"
                );
                false
            }
        })
        .collect()
}
