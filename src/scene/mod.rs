//! Light registries: where the catalog gets a level's lights from

pub mod manifest;
pub mod ecs;

pub use manifest::LevelLights;
pub use ecs::EcsLightRegistry;
