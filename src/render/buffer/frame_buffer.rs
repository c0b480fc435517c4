//! GPU storage buffer for the per-frame lighting block

use bytemuck::{Pod, Zeroable};

use crate::core::error::Error;
use crate::lighting::{MAX_LIGHTS, SLICE_TABLE_SIZE};

/// Bind group index the frame block is attached at
pub const FRAME_BLOCK_GROUP: u32 = 0;

/// Binding of the frame block inside its group
pub const FRAME_BLOCK_BINDING: u32 = 0;

/// WGSL declaration of [`FrameBlock`], for shaders to prepend
pub const FRAME_BLOCK_WGSL: &str = r#"
struct FrameBlock {
    resolution: vec2<f32>,
    _pad: vec2<f32>,
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    light_dir: vec4<f32>,
    slices_first_index: array<u32, 16>,
    light_index_pool: array<u32, 1024>,
    light_vector_pool: array<vec4<f32>, 1024>,
}

@group(0) @binding(0) var<storage, read> frame: FrameBlock;
"#;

/// Per-frame lighting data for the GPU (must match [`FRAME_BLOCK_WGSL`] exactly)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameBlock {
    /// Viewport size in pixels (8 bytes, offset 0)
    pub resolution: [f32; 2],
    /// Padding to align the matrices (8 bytes, offset 8)
    pub _pad: [f32; 2],
    /// Projection matrix (64 bytes, offset 16)
    pub projection: [[f32; 4]; 4],
    /// View matrix (64 bytes, offset 80)
    pub view: [[f32; 4]; 4],
    /// View-space direction of the primary directional light, w = 0 (16 bytes, offset 144)
    pub light_dir: [f32; 4],
    /// CSR start offsets per slice; entry 10 is the total (64 bytes, offset 160)
    pub slices_first_index: [u32; SLICE_TABLE_SIZE],
    /// Light indices of all slices, back to back (4096 bytes, offset 224)
    pub light_index_pool: [u32; MAX_LIGHTS],
    /// One vector per catalog light (16384 bytes, offset 4320)
    ///
    /// Point and spot: view-space position and radius. Directional:
    /// view-space direction with w = 0.
    pub light_vector_pool: [[f32; 4]; MAX_LIGHTS],
}

impl FrameBlock {
    /// Size in bytes
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Light indices of one slice, read back through the start table
    pub fn slice(&self, index: usize) -> &[u32] {
        let start = self.slices_first_index[index] as usize;
        let end = self.slices_first_index[index + 1] as usize;
        &self.light_index_pool[start..end]
    }
}

impl Default for FrameBlock {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// GPU buffer holding the frame block
pub struct FrameBuffer {
    /// Storage buffer
    buffer: wgpu::Buffer,
    /// Bind group layout
    bind_group_layout: wgpu::BindGroupLayout,
    /// Bind group
    bind_group: wgpu::BindGroup,
}

impl FrameBuffer {
    /// Create the frame block buffer and its bind group.
    ///
    /// Fails when the device cannot bind a storage buffer of the block's size.
    pub fn new(device: &wgpu::Device) -> Result<Self, Error> {
        let max_binding = device.limits().max_storage_buffer_binding_size as u64;
        if FrameBlock::SIZE > max_binding {
            return Err(Error::Gpu(format!(
                "frame block needs {} bytes, device binds at most {}",
                FrameBlock::SIZE, max_binding
            )));
        }

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_block"),
            size: FrameBlock::SIZE,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_block_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: FRAME_BLOCK_BINDING,
                visibility: wgpu::ShaderStages::COMPUTE | wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(FrameBlock::SIZE),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_block_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: FRAME_BLOCK_BINDING,
                resource: buffer.as_entire_binding(),
            }],
        });

        log::info!("Frame block buffer created ({} bytes)", FrameBlock::SIZE);

        Ok(Self {
            buffer,
            bind_group_layout,
            bind_group,
        })
    }

    /// Upload the whole block
    pub fn upload(&self, queue: &wgpu::Queue, block: &FrameBlock) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(block));
    }

    /// Get bind group layout
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Get bind group
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Get the raw buffer
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
