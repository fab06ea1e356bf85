use bevy::prelude::*;

/// Per-frame order: stream assets, spawn what resolved, gather input,
/// advance locomotion and animation, then settle the camera.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum UpdatePipeline {
    Load,
    Spawn,
    Input,
    Simulate,
    Camera,
}
