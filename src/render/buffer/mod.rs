//! GPU buffer management

pub mod frame_buffer;

pub use frame_buffer::{FrameBlock, FrameBuffer, FRAME_BLOCK_BINDING, FRAME_BLOCK_GROUP, FRAME_BLOCK_WGSL};
