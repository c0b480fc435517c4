//! Lighting configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Tunables for projection and light classification
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Full angle of the view cone in degrees. Lights outside it are not sliced.
    pub view_cone_degrees: f32,
    /// Near clip plane
    pub near_plane: f32,
    /// Far clip plane
    pub far_plane: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            view_cone_degrees: 120.0,
            near_plane: 1.0,
            far_plane: 32768.0,
        }
    }
}

impl LightingConfig {
    /// Reject values the projection and cone math cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.view_cone_degrees > 0.0 && self.view_cone_degrees < 180.0) {
            return Err(Error::Config(format!(
                "view_cone_degrees must be in (0, 180), got {}",
                self.view_cone_degrees
            )));
        }
        if !(self.near_plane > 0.0 && self.near_plane < self.far_plane) {
            return Err(Error::Config(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near_plane, self.far_plane
            )));
        }
        Ok(())
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

    /// Load from file (sync) and validate
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
