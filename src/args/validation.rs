use super::types::{CleanArgs, Mode};
use crate::optimizer::Site;
use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The file '{file}' is not readable."));
    }
    Ok(path)
}

impl CleanArgs {
    /// # Errors
    ///
    /// Will return `Err` if a merged value is out of range or a required value is missing
    pub fn validate(&self) -> Result<(), String> {
        self.simulation.validate().map_err(|e| e.to_string())?;
        if self.field.round_range == 0 {
            return Err("round range must be at least 1".to_string());
        }

        self.fantasy
            .site
            .parse::<Site>()
            .map_err(|e| e.to_string())?;
        if self.fantasy.lineups == 0 {
            return Err("lineups must be at least 1".to_string());
        }
        if !(0.0..=100.0).contains(&self.fantasy.max_exposure) {
            return Err(format!(
                "max exposure is a percentage between 0 and 100, got {}",
                self.fantasy.max_exposure
            ));
        }
        if self.fantasy.budget <= 0 {
            return Err(format!("budget must be positive, got {}", self.fantasy.budget));
        }

        if self.needs_provider() && self.provider.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(
                "a DataGolf API key is required (--datagolf-api-key or DATAGOLF_API_KEY)"
                    .to_string(),
            );
        }
        Ok(())
    }

    /// Whether this run talks to the live feeds.
    #[must_use]
    pub fn needs_provider(&self) -> bool {
        !matches!(self.mode, Mode::Odds { american: Some(_), .. })
    }
}
