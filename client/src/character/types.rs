use bevy::prelude::*;

/// Marker for the character root entity.
#[derive(Component)]
pub struct CharacterRoot;

/// Per-character locomotion state advanced by the integrator each frame.
///
/// Heading lives in the root `Transform` rotation and is restricted to the
/// Y axis; only the scalar pieces live here.
#[derive(Component, Default)]
pub struct CharacterMotion {
    pub forward_speed: f32,
    pub vertical_velocity: f32,
    pub is_jumping: bool,
}

/// The four clips the character can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipName {
    Idle,
    Walk,
    Backwards,
    Jump,
}

impl ClipName {
    pub fn label(self) -> &'static str {
        match self {
            ClipName::Idle => "idle",
            ClipName::Walk => "walk",
            ClipName::Backwards => "backwards",
            ClipName::Jump => "jump",
        }
    }
}

/// The single clip currently driving the skeleton. Ownership transfers at
/// request time; the underlying player blends during the crossfade window.
#[derive(Component, Default)]
pub struct ActiveClip {
    pub current: Option<ClipName>,
}
