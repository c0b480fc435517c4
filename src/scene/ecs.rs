//! Light registry backed by a `hecs` world

use crate::lighting::{LightCategory, LightEntity, LightRegistry};

/// Reads light emitters out of an ECS world.
///
/// An entity is a light when it carries both a [`LightEntity`] and a
/// [`LightCategory`] component. Each category list is ordered by entity id,
/// so back-references stay stable for an unchanged world.
pub struct EcsLightRegistry<'w> {
    world: &'w hecs::World,
}

impl<'w> EcsLightRegistry<'w> {
    pub fn new(world: &'w hecs::World) -> Self {
        Self { world }
    }

    fn collect(&self, category: LightCategory) -> Vec<LightEntity> {
        let mut query = self.world.query::<(&LightEntity, &LightCategory)>();
        let mut found: Vec<(u32, LightEntity)> = query
            .iter()
            .filter(|(_, (_, c))| **c == category)
            .map(|(entity, (light, _))| (entity.id(), *light))
            .collect();
        found.sort_by_key(|(id, _)| *id);
        found.into_iter().map(|(_, light)| light).collect()
    }
}

impl LightRegistry for EcsLightRegistry<'_> {
    fn ambient_lamps(&self) -> Vec<LightEntity> {
        self.collect(LightCategory::AmbientLamp)
    }

    fn trigger_lights(&self) -> Vec<LightEntity> {
        self.collect(LightCategory::TriggerLight)
    }

    fn point_lights(&self) -> Vec<LightEntity> {
        self.collect(LightCategory::PointLight)
    }

    fn spot_lights(&self) -> Vec<LightEntity> {
        self.collect(LightCategory::SpotLight)
    }

    /// Lowest-id entity tagged as the augmentation light
    fn augmentation_light(&self) -> Option<LightEntity> {
        self.collect(LightCategory::Augmentation).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::lighting::LightCatalog;

    #[test]
    fn test_collects_by_category() {
        let mut world = hecs::World::new();
        world.spawn((LightEntity::point(Vec3::ZERO, 1.0, Vec3::X), LightCategory::PointLight));
        world.spawn((LightEntity::point(Vec3::ONE, 2.0, Vec3::Y), LightCategory::TriggerLight));
        world.spawn((LightEntity::point(Vec3::Z, 3.0, Vec3::Z), LightCategory::PointLight));
        // Not a light: no category
        world.spawn((LightEntity::point(Vec3::Y, 4.0, Vec3::ONE),));

        let registry = EcsLightRegistry::new(&world);
        let points = registry.point_lights();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].color, Vec3::X);
        assert_eq!(points[1].color, Vec3::Z);
        assert_eq!(registry.trigger_lights().len(), 1);
        assert!(registry.spot_lights().is_empty());
        assert!(registry.augmentation_light().is_none());
    }

    #[test]
    fn test_catalog_from_world() {
        let mut world = hecs::World::new();
        world.spawn((LightEntity::directional(-Vec3::Y, Vec3::ONE), LightCategory::AmbientLamp));
        world.spawn((LightEntity::spot(Vec3::ZERO, -Vec3::Z, 8.0, 30.0, Vec3::ONE), LightCategory::SpotLight));

        let mut catalog = LightCatalog::new();
        catalog.rebuild(&EcsLightRegistry::new(&world));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve(1).map(|o| o.category), Some(LightCategory::SpotLight));
    }

    #[test]
    fn test_augmentation_light_from_world() {
        let mut world = hecs::World::new();
        world.spawn((LightEntity::point(Vec3::ZERO, 4.0, Vec3::X), LightCategory::Augmentation));
        world.spawn((LightEntity::point(Vec3::ONE, 2.0, Vec3::ONE), LightCategory::PointLight));
        world.spawn((LightEntity::point(Vec3::Y, 6.0, Vec3::Y), LightCategory::Augmentation));

        let registry = EcsLightRegistry::new(&world);
        assert_eq!(registry.augmentation_light().map(|l| l.color), Some(Vec3::X));

        let mut catalog = LightCatalog::new();
        catalog.rebuild(&registry);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve(1).map(|o| o.category), Some(LightCategory::Augmentation));
    }
}
