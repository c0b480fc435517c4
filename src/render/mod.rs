//! GPU-facing side: the frame block, its buffer and the synchronizer

pub mod context;
pub mod buffer;
pub mod frame_state;
pub mod frame_sync;

pub use context::GpuContext;
pub use frame_state::{FrameChanges, FrameState};
pub use frame_sync::FrameSync;
