//! Slicelight - per-frame sliced light indexing for wgpu renderers
//!
//! Tracks projection, camera and level changes, sorts a level's lights into
//! angular slices around the view direction, and keeps one GPU storage
//! buffer ([`render::buffer::FrameBlock`]) current every frame.

pub mod core;
pub mod lighting;
pub mod scene;
pub mod render;
