use super::intent::MovementIntent;
use crate::camera::CameraNudge;
use crate::character::{AnimationRequest, CharacterMotion, CharacterRoot, ClipName};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Capped radius of the camera joystick hit area, in logical pixels.
pub const JOYSTICK_RADIUS: f32 = 80.0;
/// Pixel displacement to world-offset conversion for the camera nudge.
const JOYSTICK_NUDGE_GAIN: f32 = 0.02;
/// Joystick center, measured from the bottom-right window corner.
const JOYSTICK_MARGIN: f32 = 120.0;

/// Actions backing the on-screen hold buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Forward,
    Backward,
    RotateLeft,
    RotateRight,
    Jump,
}

/// Marker on each on-screen control button.
#[derive(Component)]
pub struct TouchButton(pub TouchAction);

/// Hold state of the on-screen buttons, rebuilt every frame.
#[derive(Resource, Default, Clone, Copy, PartialEq)]
pub struct TouchControls {
    pub forward: bool,
    pub backward: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub jump: bool,
}

/// Rebuild the hold flags from the UI button interactions.
pub fn read_touch_buttons(
    mut controls: ResMut<TouchControls>,
    buttons: Query<(&Interaction, &TouchButton)>,
) {
    let mut next = TouchControls::default();
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button.0 {
            TouchAction::Forward => next.forward = true,
            TouchAction::Backward => next.backward = true,
            TouchAction::RotateLeft => next.rotate_left = true,
            TouchAction::RotateRight => next.rotate_right = true,
            TouchAction::Jump => next.jump = true,
        }
    }
    *controls = next;
}

/// Fold the touch hold flags into the shared intent, re-evaluated every
/// frame. Forward is evaluated before backward, so backward wins any frame
/// where both are held. A no-op until the character exists.
pub fn fold_touch_intent(
    controls: Res<TouchControls>,
    mut previous: Local<TouchControls>,
    mut intent: ResMut<MovementIntent>,
    characters: Query<&CharacterMotion, With<CharacterRoot>>,
    mut animation_requests: MessageWriter<AnimationRequest>,
) {
    let Ok(motion) = characters.single() else {
        return;
    };

    if controls.forward {
        intent.forward = 1.0;
    }
    if controls.backward {
        intent.forward = -1.0;
    }
    if controls.rotate_left {
        intent.rotate_left = true;
    }
    if controls.rotate_right {
        intent.rotate_right = true;
    }

    if controls.forward && !previous.forward {
        animation_requests.write(AnimationRequest(ClipName::Walk));
    }
    if controls.backward && !previous.backward {
        animation_requests.write(AnimationRequest(ClipName::Backwards));
    }
    if controls.jump && !previous.jump && !motion.is_jumping {
        intent.jump_pressed = true;
        intent.jump_held = true;
        animation_requests.write(AnimationRequest(ClipName::Jump));
    }

    let mut released = false;
    if !controls.forward && !controls.backward && (previous.forward || previous.backward) {
        intent.forward = 0.0;
        released = true;
    }
    if !controls.jump && previous.jump {
        intent.jump_released = true;
        intent.jump_held = false;
        released = true;
    }
    if released && intent.forward == 0.0 {
        animation_requests.write(AnimationRequest(ClipName::Idle));
    }

    *previous = *controls;
}

/// Map a touch held inside the joystick area to a capped camera-position
/// nudge. Camera-only side channel; never feeds locomotion.
pub fn read_touch_joystick(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut nudge: ResMut<CameraNudge>,
) {
    nudge.0 = Vec2::ZERO;
    let Ok(window) = windows.single() else {
        return;
    };

    let center = joystick_center(window.width(), window.height());
    for touch in touches.iter() {
        if touch.start_position().distance(center) > JOYSTICK_RADIUS {
            continue;
        }
        let displacement = touch.position() - touch.start_position();
        nudge.0 = displacement.clamp_length_max(JOYSTICK_RADIUS) * JOYSTICK_NUDGE_GAIN;
    }
}

pub fn joystick_center(window_width: f32, window_height: f32) -> Vec2 {
    Vec2::new(window_width - JOYSTICK_MARGIN, window_height - JOYSTICK_MARGIN)
}
