use crate::error::CoreError;
use crate::model::WeightSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SavedModel {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub weights: WeightSet,
}

/// Named weight sets, kept in creation order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SavedModels {
    models: Vec<SavedModel>,
}

impl SavedModels {
    pub fn save(&mut self, name: impl Into<String>, weights: WeightSet) -> &SavedModel {
        let model = SavedModel {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            weights,
        };
        self.models.push(model);
        &self.models[self.models.len() - 1]
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&SavedModel> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Returns `true` if a model was removed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.models.len();
        self.models.retain(|m| m.id != id);
        before != self.models.len()
    }

    #[must_use]
    pub fn list(&self) -> &[SavedModel] {
        &self.models
    }

    /// A missing file is an empty library.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file exists but cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// # Errors
    ///
    /// Will return `Err` if the file cannot be written
    pub fn store(&self, path: &Path) -> Result<(), CoreError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
