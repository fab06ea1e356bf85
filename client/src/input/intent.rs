use bevy::prelude::*;

/// Normalized per-frame summary of all active input.
///
/// `forward` is held state maintained by the key/touch handlers; the rest
/// are frame-scoped events the locomotion integrator consumes exactly once.
#[derive(Resource, Default)]
pub struct MovementIntent {
    /// -1.0, 0.0 or +1.0.
    pub forward: f32,
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Edge-triggered jump launch, latched by the handlers only while the
    /// character is not already jumping.
    pub jump_pressed: bool,
    /// Edge-triggered jump release.
    pub jump_released: bool,
    /// Whether the jump key/button is currently held.
    pub jump_held: bool,
}

/// Frame-scoped slice of the intent, taken by the integrator.
pub struct IntentFrameEvents {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
}

impl MovementIntent {
    /// Consume this frame's one-shot events, leaving held state in place.
    pub fn take_frame_events(&mut self) -> IntentFrameEvents {
        IntentFrameEvents {
            rotate_left: std::mem::take(&mut self.rotate_left),
            rotate_right: std::mem::take(&mut self.rotate_right),
            jump_pressed: std::mem::take(&mut self.jump_pressed),
            jump_released: std::mem::take(&mut self.jump_released),
        }
    }
}
