//! Core types and utilities

pub mod types;
pub mod error;
pub mod logging;
pub mod camera;
pub mod frame;

pub use types::*;
pub use error::Error;
pub use camera::{CameraPose, projection_matrix};
pub use frame::{FrameDesc, LevelId};
