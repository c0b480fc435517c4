//! Dirty checks for projection, view and level
//!
//! Each check compares the incoming frame against its cached key, overwrites
//! the cache and recomputes the derived values when they differ. An empty
//! cache always reports dirty, so the first frame primes everything.

use super::config::LightingConfig;
use super::HALF_DEGREE_TO_RADIANS;
use crate::core::camera::{CameraPose, projection_matrix};
use crate::core::frame::{FrameDesc, LevelId};
use crate::core::types::Mat4;
use crate::core::Result;

/// Inputs the projection matrix depends on
#[derive(Clone, Copy, Debug, PartialEq)]
struct ProjectionKey {
    fov_degrees: f32,
    viewport_width: u32,
    viewport_height: u32,
}

/// Cached projection, view and level state
#[derive(Clone, Debug)]
pub struct ChangeDetector {
    config: LightingConfig,

    projection_key: Option<ProjectionKey>,
    projection: Mat4,

    pose: Option<CameraPose>,
    view: Mat4,
    /// cos² of the view cone half-angle
    squared_view_cone_cos: f32,

    level: Option<LevelId>,
}

impl ChangeDetector {
    /// Fails with [`Error::Config`](crate::core::Error::Config) when the config
    /// cannot produce a view cone or a projection.
    pub fn new(config: LightingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            projection_key: None,
            projection: Mat4::IDENTITY,
            pose: None,
            view: Mat4::IDENTITY,
            squared_view_cone_cos: 0.0,
            level: None,
        })
    }

    /// Returns true and recomputes the projection matrix when fov or viewport changed.
    ///
    /// Fov and viewport are engine-quantized, so exact comparison is used.
    pub fn check_projection(&mut self, frame: &FrameDesc) -> bool {
        let key = ProjectionKey {
            fov_degrees: frame.fov_degrees,
            viewport_width: frame.viewport_width,
            viewport_height: frame.viewport_height,
        };
        if self.projection_key == Some(key) {
            return false;
        }

        self.projection = projection_matrix(
            frame.fov_degrees,
            frame.aspect(),
            self.config.near_plane,
            self.config.far_plane,
        );
        self.projection_key = Some(key);
        log::debug!(
            "Projection changed: fov={} viewport={}x{}",
            frame.fov_degrees, frame.viewport_width, frame.viewport_height
        );
        true
    }

    /// Returns true and recomputes the view matrix and cone threshold when the pose changed.
    pub fn check_view(&mut self, frame: &FrameDesc) -> bool {
        // Exact inequality: any jitter from the camera system repartitions.
        if self.pose == Some(frame.pose) {
            return false;
        }

        self.view = frame.pose.view_matrix();
        let cos = (self.config.view_cone_degrees * HALF_DEGREE_TO_RADIANS).cos();
        self.squared_view_cone_cos = cos * cos;
        self.pose = Some(frame.pose);
        log::trace!("View changed: position={:?}", frame.pose.position);
        true
    }

    /// Returns true when a different level is loaded.
    pub fn check_level(&mut self, frame: &FrameDesc) -> bool {
        if self.level == Some(frame.level) {
            return false;
        }

        log::debug!("Level changed: {:?} -> {:?}", self.level, frame.level);
        self.level = Some(frame.level);
        true
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    pub fn squared_view_cone_cos(&self) -> f32 {
        self.squared_view_cone_cos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Quat, Vec3};
    use crate::core::Error;

    fn frame() -> FrameDesc {
        FrameDesc::new(90.0, 1280, 720, CameraPose::default(), LevelId(1))
    }

    #[test]
    fn test_checks_fire_once() {
        let mut detector = ChangeDetector::new(LightingConfig::default()).unwrap();
        let frame = frame();

        assert!(detector.check_projection(&frame));
        assert!(!detector.check_projection(&frame));

        assert!(detector.check_view(&frame));
        assert!(!detector.check_view(&frame));

        assert!(detector.check_level(&frame));
        assert!(!detector.check_level(&frame));
    }

    #[test]
    fn test_checks_are_independent() {
        let mut detector = ChangeDetector::new(LightingConfig::default()).unwrap();
        let mut frame = frame();
        detector.check_projection(&frame);
        detector.check_view(&frame);
        detector.check_level(&frame);

        frame.viewport_width = 1920;
        assert!(detector.check_projection(&frame));
        assert!(!detector.check_view(&frame));
        assert!(!detector.check_level(&frame));

        frame.pose.rotation = Quat::from_rotation_y(0.1);
        assert!(!detector.check_projection(&frame));
        assert!(detector.check_view(&frame));
        assert!(!detector.check_level(&frame));

        frame.level = LevelId(2);
        assert!(!detector.check_projection(&frame));
        assert!(!detector.check_view(&frame));
        assert!(detector.check_level(&frame));
    }

    #[test]
    fn test_projection_follows_viewport() {
        let mut detector = ChangeDetector::new(LightingConfig::default()).unwrap();
        let mut frame = frame();
        detector.check_projection(&frame);
        let before = *detector.projection_matrix();

        frame.viewport_height = 1024;
        detector.check_projection(&frame);
        assert_ne!(before, *detector.projection_matrix());
    }

    #[test]
    fn test_view_cone_threshold() {
        let config = LightingConfig { view_cone_degrees: 90.0, ..Default::default() };
        let mut detector = ChangeDetector::new(config).unwrap();
        detector.check_view(&frame());

        // Half-angle of 45 degrees: cos² = 0.5
        assert!((detector.squared_view_cone_cos() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_tracks_pose() {
        let mut detector = ChangeDetector::new(LightingConfig::default()).unwrap();
        let mut frame = frame();
        frame.pose.position = Vec3::new(0.0, 0.0, 10.0);
        detector.check_view(&frame);

        let p = detector.view_matrix().transform_point3(Vec3::ZERO);
        assert!((p.z - (-10.0)).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_unusable_config() {
        let wide = LightingConfig { view_cone_degrees: 200.0, ..Default::default() };
        assert!(matches!(ChangeDetector::new(wide), Err(Error::Config(_))));

        let inverted = LightingConfig { near_plane: 10.0, far_plane: 5.0, ..Default::default() };
        assert!(matches!(ChangeDetector::new(inverted), Err(Error::Config(_))));
    }
}
