//! Per-frame lighting synchronizer
//!
//! Owns the GPU frame block buffer and the cached lighting state. Call
//! [`FrameSync::update`] once per frame before recording the draw calls that
//! read the block, then [`FrameSync::bind_render`] or
//! [`FrameSync::bind_compute`] on each pass that needs it.

use crate::core::error::Error;
use crate::core::frame::FrameDesc;
use crate::lighting::{LightRegistry, LightingConfig};
use crate::render::buffer::{FrameBuffer, FRAME_BLOCK_GROUP};
use crate::render::frame_state::{FrameChanges, FrameState};

/// Lighting state bound to its GPU buffer. One writer: the render thread.
pub struct FrameSync {
    state: FrameState,
    buffer: FrameBuffer,
}

impl FrameSync {
    /// Create the frame block buffer. The renderer cannot run without it,
    /// so failure is returned to the caller as fatal.
    pub fn new(device: &wgpu::Device, config: LightingConfig) -> Result<Self, Error> {
        let state = FrameState::new(config)?;
        let buffer = FrameBuffer::new(device)?;
        Ok(Self { state, buffer })
    }

    /// Refresh the cached state for this frame and upload the block.
    ///
    /// The upload happens every frame, even when nothing changed.
    pub fn update(&mut self, queue: &wgpu::Queue, frame: &FrameDesc, registry: &dyn LightRegistry) -> FrameChanges {
        let changes = self.state.prepare(frame, registry);
        self.buffer.upload(queue, self.state.block());
        if changes.any() {
            log::trace!("Frame block updated: {:?}", changes);
        }
        changes
    }

    /// Attach the frame block to a render pass
    pub fn bind_render(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(FRAME_BLOCK_GROUP, self.buffer.bind_group(), &[]);
    }

    /// Attach the frame block to a compute pass
    pub fn bind_compute(&self, pass: &mut wgpu::ComputePass<'_>) {
        pass.set_bind_group(FRAME_BLOCK_GROUP, self.buffer.bind_group(), &[]);
    }

    /// Layout for pipelines that read the frame block
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        self.buffer.bind_group_layout()
    }

    pub fn state(&self) -> &FrameState {
        &self.state
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::CameraPose;
    use crate::core::frame::LevelId;
    use crate::core::types::Vec3;
    use crate::lighting::LightEntity;
    use crate::render::buffer::FrameBlock;
    use crate::render::context::GpuContext;
    use crate::scene::LevelLights;

    #[test]
    fn test_rejects_invalid_config() {
        let Ok(ctx) = pollster::block_on(GpuContext::new_headless()) else {
            eprintln!("No GPU adapter, skipping");
            return;
        };
        let config = LightingConfig { view_cone_degrees: 0.0, ..Default::default() };
        assert!(matches!(FrameSync::new(&ctx.device, config), Err(Error::Config(_))));
    }

    #[test]
    fn test_update_uploads_block() {
        let Ok(ctx) = pollster::block_on(GpuContext::new_headless()) else {
            eprintln!("No GPU adapter, skipping");
            return;
        };

        let mut sync = FrameSync::new(&ctx.device, LightingConfig::default()).unwrap();
        assert_eq!(sync.buffer().buffer().size(), FrameBlock::SIZE);

        let level = LevelLights {
            point_lights: vec![LightEntity::point(Vec3::new(0.0, 0.0, -10.0), 1.0, Vec3::ONE)],
            ..Default::default()
        };
        let frame = FrameDesc::new(90.0, 640, 480, CameraPose::default(), LevelId(3));

        let first = sync.update(&ctx.queue, &frame, &level);
        let second = sync.update(&ctx.queue, &frame, &level);
        assert!(first.repartitioned);
        assert!(!second.any());
        ctx.queue.submit([]);

        assert_eq!(sync.state().block().slice(0), &[0]);
    }
}
