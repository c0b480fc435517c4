//! Per-frame scene description consumed by the change checks

use serde::{Deserialize, Serialize};

use crate::core::camera::CameraPose;

/// Identifier of the currently loaded level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelId(pub i32);

/// Everything the lighting state needs from the scene for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameDesc {
    /// Horizontal field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Camera placement
    pub pose: CameraPose,
    /// Level currently loaded
    pub level: LevelId,
}

impl FrameDesc {
    pub fn new(fov_degrees: f32, viewport_width: u32, viewport_height: u32, pose: CameraPose, level: LevelId) -> Self {
        Self {
            fov_degrees,
            viewport_width,
            viewport_height,
            pose,
            level,
        }
    }

    /// Aspect ratio (width / height), guarded against a zero-height viewport
    pub fn aspect(&self) -> f32 {
        self.viewport_width.max(1) as f32 / self.viewport_height.max(1) as f32
    }

    /// Viewport size as floats, as the shader reads it
    pub fn resolution(&self) -> [f32; 2] {
        [self.viewport_width as f32, self.viewport_height as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_guards_zero_height() {
        let frame = FrameDesc::new(90.0, 1920, 0, CameraPose::default(), LevelId(0));
        assert_eq!(frame.aspect(), 1920.0);
    }
}
