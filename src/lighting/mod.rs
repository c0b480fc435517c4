//! Light catalog, change detection and slice partitioning
//!
//! The lighting state is rebuilt lazily: the catalog only when the level
//! changes, the slice table only when the level or the camera pose changes.

pub mod config;
pub mod record;
pub mod registry;
pub mod catalog;
pub mod change;
pub mod slices;

pub use config::LightingConfig;
pub use record::{LightCategory, LightEntity, LightKind, LightOrigin, LightRecord, LightShape};
pub use registry::LightRegistry;
pub use catalog::LightCatalog;
pub use change::ChangeDetector;
pub use slices::{SlicePartitioner, ViewCone, CsrStats};

/// Number of angular slices around the view direction
pub const SLICE_COUNT: usize = 10;

/// Capacity of the slice start table (slices, sentinel and padding)
pub const SLICE_TABLE_SIZE: usize = 16;

/// Capacity of the light vector pool and of the flattened index pool
pub const MAX_LIGHTS: usize = 1024;

/// Degrees to radians, halved: turns a full cone angle into its half-angle
pub const HALF_DEGREE_TO_RADIANS: f32 = std::f32::consts::PI / 360.0;
