//! Light records: the flattened, uniform form of every light in a level

use serde::{Deserialize, Serialize};

use crate::core::types::{Vec3, Vec4};

/// Light kind as the shader sees it
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightKind {
    Directional = 1,
    Point = 2,
    Spot = 3,
}

/// World-entity category a light was gathered from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightCategory {
    AmbientLamp,
    TriggerLight,
    PointLight,
    SpotLight,
    /// The player's augmentation light, at most one per level
    Augmentation,
}

impl LightCategory {
    /// Query order used when flattening the registry
    pub const ALL: [LightCategory; 5] = [
        LightCategory::AmbientLamp,
        LightCategory::TriggerLight,
        LightCategory::PointLight,
        LightCategory::SpotLight,
        LightCategory::Augmentation,
    ];
}

/// Back-reference from a record to the entity it was built from.
///
/// `real_index` is the entity's position in its category list at level load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LightOrigin {
    pub category: LightCategory,
    pub real_index: usize,
}

/// Emission shape of a light entity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum LightShape {
    /// Parallel light along `direction`, reaches everywhere
    Directional { direction: Vec3 },
    /// Omni light with influence `radius`
    Point { radius: f32 },
    /// Cone light; `cone_degrees` is the half-angle of the cone
    Spot { direction: Vec3, radius: f32, cone_degrees: f32 },
}

/// A light-emitting entity as reported by the world registry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightEntity {
    /// Linear RGB color
    pub color: Vec3,
    /// World position
    pub location: Vec3,
    pub shape: LightShape,
}

impl LightEntity {
    pub fn point(location: Vec3, radius: f32, color: Vec3) -> Self {
        Self { color, location, shape: LightShape::Point { radius } }
    }

    pub fn spot(location: Vec3, direction: Vec3, radius: f32, cone_degrees: f32, color: Vec3) -> Self {
        Self { color, location, shape: LightShape::Spot { direction, radius, cone_degrees } }
    }

    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Self { color, location: Vec3::ZERO, shape: LightShape::Directional { direction } }
    }
}

/// Uniform light data built once per level load.
///
/// `location.w` holds the influence radius and `direction.w` the cosine of
/// the spot half-angle (zero for other kinds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRecord {
    pub color: Vec4,
    pub location: Vec4,
    pub direction: Vec4,
    pub origin: LightOrigin,
    pub kind: LightKind,
}

impl LightRecord {
    pub fn from_entity(entity: &LightEntity, origin: LightOrigin) -> Self {
        let color = entity.color.extend(1.0);
        let (kind, location, direction) = match entity.shape {
            LightShape::Directional { direction } => (
                LightKind::Directional,
                entity.location.extend(0.0),
                direction.normalize_or_zero().extend(0.0),
            ),
            LightShape::Point { radius } => (
                LightKind::Point,
                entity.location.extend(radius.max(0.0)),
                Vec4::ZERO,
            ),
            LightShape::Spot { direction, radius, cone_degrees } => (
                LightKind::Spot,
                entity.location.extend(radius.max(0.0)),
                direction
                    .normalize_or_zero()
                    .extend(cone_degrees.clamp(0.0, 180.0).to_radians().cos()),
            ),
        };

        Self { color, location, direction, origin, kind }
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.location.truncate()
    }

    /// Influence radius (zero for directional lights)
    pub fn radius(&self) -> f32 {
        self.location.w
    }

    /// Bounding sphere of everything the light can reach, as (center, radius).
    ///
    /// `None` for directional lights, which have no bounded influence.
    pub fn influence_sphere(&self) -> Option<(Vec3, f32)> {
        match self.kind {
            LightKind::Directional => None,
            LightKind::Point => Some((self.position(), self.radius())),
            LightKind::Spot => Some(spot_bounding_sphere(
                self.position(),
                self.direction.truncate(),
                self.radius(),
                self.direction.w,
            )),
        }
    }
}

/// Tightest sphere around a spot cone of length `range` and half-angle cosine `cos_half`.
fn spot_bounding_sphere(apex: Vec3, dir: Vec3, range: f32, cos_half: f32) -> (Vec3, f32) {
    if cos_half <= 0.0 || dir == Vec3::ZERO {
        // Hemisphere or wider: the cone fills most of the full sphere.
        return (apex, range);
    }
    if cos_half < std::f32::consts::FRAC_1_SQRT_2 {
        // Wider than 45 degrees: the rim circle bounds the cone.
        let sin_half = (1.0 - cos_half * cos_half).sqrt();
        (apex + dir * (range * cos_half), range * sin_half)
    } else {
        // Narrow cone: sphere through the apex and the rim.
        let r = range / (2.0 * cos_half);
        (apex + dir * r, r)
    }
}
