//! World-entity registry seam

use super::record::{LightCategory, LightEntity};

/// Source of light-emitting entities for the current level.
///
/// Queried only when the level changes. Each list's order defines the
/// `real_index` back-references, so it must be stable for a given level.
pub trait LightRegistry {
    fn ambient_lamps(&self) -> Vec<LightEntity>;
    fn trigger_lights(&self) -> Vec<LightEntity>;
    fn point_lights(&self) -> Vec<LightEntity>;
    fn spot_lights(&self) -> Vec<LightEntity>;

    /// Light carried by the player, if the level has one
    fn augmentation_light(&self) -> Option<LightEntity> {
        None
    }

    /// Query one category by tag
    fn lights_in(&self, category: LightCategory) -> Vec<LightEntity> {
        match category {
            LightCategory::AmbientLamp => self.ambient_lamps(),
            LightCategory::TriggerLight => self.trigger_lights(),
            LightCategory::PointLight => self.point_lights(),
            LightCategory::SpotLight => self.spot_lights(),
            LightCategory::Augmentation => self.augmentation_light().into_iter().collect(),
        }
    }
}
