//! Light catalog: every light of the current level, flattened once per level load

use super::record::{LightCategory, LightKind, LightOrigin, LightRecord};
use super::registry::LightRegistry;
use super::MAX_LIGHTS;
use crate::core::types::Vec3;

/// Flat list of light records for the loaded level.
///
/// Never holds more than [`MAX_LIGHTS`] records; the index of a record is the
/// light index the shader sees.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightCatalog {
    records: Vec<LightRecord>,
    /// Entities left out of the last rebuild because the pool was full
    dropped: usize,
}

impl LightCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog with the lights the registry reports.
    ///
    /// Categories are flattened in [`LightCategory::ALL`] order, so the
    /// augmentation light comes last. Lights past the pool capacity are dropped.
    pub fn rebuild(&mut self, registry: &dyn LightRegistry) {
        self.records.clear();
        self.dropped = 0;

        for category in LightCategory::ALL {
            let entities = registry.lights_in(category);
            for (real_index, entity) in entities.iter().enumerate() {
                if self.records.len() >= MAX_LIGHTS {
                    self.dropped += 1;
                    continue;
                }
                let origin = LightOrigin { category, real_index };
                self.records.push(LightRecord::from_entity(entity, origin));
            }
        }

        if self.dropped > 0 {
            log::warn!(
                "Light catalog full: dropped {} of {} lights (capacity {})",
                self.dropped,
                self.dropped + self.records.len(),
                MAX_LIGHTS
            );
        }
        log::info!("Light catalog rebuilt: {} lights", self.records.len());
    }

    pub fn records(&self) -> &[LightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of lights dropped by the last rebuild
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Map a shader-visible light index back to the entity it came from
    pub fn resolve(&self, index: u32) -> Option<LightOrigin> {
        self.records.get(index as usize).map(|r| r.origin)
    }

    /// World direction of the first directional light, if the level has one
    pub fn primary_direction(&self) -> Option<Vec3> {
        self.records
            .iter()
            .find(|r| r.kind == LightKind::Directional)
            .map(|r| r.direction.truncate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::record::LightEntity;
    use crate::scene::LevelLights;

    fn sample_level() -> LevelLights {
        LevelLights {
            ambient_lamps: vec![LightEntity::directional(-Vec3::Y, Vec3::ONE)],
            trigger_lights: vec![
                LightEntity::point(Vec3::new(0.0, 0.0, -5.0), 2.0, Vec3::X),
                LightEntity::point(Vec3::new(1.0, 0.0, -5.0), 2.0, Vec3::Y),
            ],
            point_lights: vec![LightEntity::point(Vec3::new(0.0, 3.0, -5.0), 1.0, Vec3::Z)],
            spot_lights: vec![LightEntity::spot(Vec3::ZERO, -Vec3::Z, 10.0, 30.0, Vec3::ONE)],
            augmentation_light: None,
        }
    }

    #[test]
    fn test_rebuild_flattens_in_category_order() {
        let mut catalog = LightCatalog::new();
        catalog.rebuild(&sample_level());

        assert_eq!(catalog.len(), 5);
        let origins: Vec<_> = catalog.records().iter().map(|r| (r.origin.category, r.origin.real_index)).collect();
        assert_eq!(origins, vec![
            (LightCategory::AmbientLamp, 0),
            (LightCategory::TriggerLight, 0),
            (LightCategory::TriggerLight, 1),
            (LightCategory::PointLight, 0),
            (LightCategory::SpotLight, 0),
        ]);
    }

    #[test]
    fn test_augmentation_light_comes_last() {
        let level = LevelLights {
            augmentation_light: Some(LightEntity::spot(Vec3::ZERO, -Vec3::Z, 15.0, 20.0, Vec3::ONE)),
            ..sample_level()
        };

        let mut catalog = LightCatalog::new();
        catalog.rebuild(&level);

        assert_eq!(catalog.len(), 6);
        assert_eq!(
            catalog.resolve(5),
            Some(LightOrigin { category: LightCategory::Augmentation, real_index: 0 })
        );
        assert_eq!(catalog.records()[5].kind, LightKind::Spot);
    }

    #[test]
    fn test_augmentation_light_respects_capacity() {
        let level = LevelLights {
            point_lights: (0..MAX_LIGHTS)
                .map(|i| LightEntity::point(Vec3::new(i as f32, 0.0, -10.0), 1.0, Vec3::ONE))
                .collect(),
            augmentation_light: Some(LightEntity::point(Vec3::ZERO, 5.0, Vec3::ONE)),
            ..Default::default()
        };

        let mut catalog = LightCatalog::new();
        catalog.rebuild(&level);

        assert_eq!(catalog.len(), MAX_LIGHTS);
        assert_eq!(catalog.dropped(), 1);
        assert!(catalog.records().iter().all(|r| r.origin.category != LightCategory::Augmentation));
    }

    #[test]
    fn test_resolve_back_reference() {
        let mut catalog = LightCatalog::new();
        catalog.rebuild(&sample_level());

        assert_eq!(
            catalog.resolve(2),
            Some(LightOrigin { category: LightCategory::TriggerLight, real_index: 1 })
        );
        assert_eq!(catalog.resolve(5), None);
    }

    #[test]
    fn test_rebuild_replaces_previous_level() {
        let mut catalog = LightCatalog::new();
        catalog.rebuild(&sample_level());
        catalog.rebuild(&LevelLights::default());
        assert!(catalog.is_empty());
        assert_eq!(catalog.primary_direction(), None);
    }

    #[test]
    fn test_primary_direction() {
        let mut catalog = LightCatalog::new();
        catalog.rebuild(&sample_level());
        assert_eq!(catalog.primary_direction(), Some(-Vec3::Y));
    }

    #[test]
    fn test_overflow_caps_at_pool_size() {
        let level = LevelLights {
            point_lights: (0..MAX_LIGHTS + 1)
                .map(|i| LightEntity::point(Vec3::new(i as f32, 0.0, -10.0), 1.0, Vec3::ONE))
                .collect(),
            ..Default::default()
        };

        let mut catalog = LightCatalog::new();
        catalog.rebuild(&level);

        assert_eq!(catalog.len(), MAX_LIGHTS);
        assert_eq!(catalog.dropped(), 1);
        // The last entity is the one left out
        assert_eq!(catalog.records().last().unwrap().origin.real_index, MAX_LIGHTS - 1);
    }
}
