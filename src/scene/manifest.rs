//! Level light manifests: a level's lights listed by category in JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::lighting::{LightEntity, LightRegistry};

/// All light emitters of one level, grouped the way the registry reports them
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLights {
    pub ambient_lamps: Vec<LightEntity>,
    pub trigger_lights: Vec<LightEntity>,
    pub point_lights: Vec<LightEntity>,
    pub spot_lights: Vec<LightEntity>,
    /// Light the player carries through the level
    pub augmentation_light: Option<LightEntity>,
}

impl LevelLights {
    /// Total number of emitters across categories
    pub fn len(&self) -> usize {
        self.ambient_lamps.len()
            + self.trigger_lights.len()
            + self.point_lights.len()
            + self.spot_lights.len()
            + usize::from(self.augmentation_light.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file (sync)
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let lights = serde_json::from_str(&json)?;
        Ok(lights)
    }
}

impl LightRegistry for LevelLights {
    fn ambient_lamps(&self) -> Vec<LightEntity> {
        self.ambient_lamps.clone()
    }

    fn trigger_lights(&self) -> Vec<LightEntity> {
        self.trigger_lights.clone()
    }

    fn point_lights(&self) -> Vec<LightEntity> {
        self.point_lights.clone()
    }

    fn spot_lights(&self) -> Vec<LightEntity> {
        self.spot_lights.clone()
    }

    fn augmentation_light(&self) -> Option<LightEntity> {
        self.augmentation_light
    }
}
