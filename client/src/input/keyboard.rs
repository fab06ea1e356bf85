use super::intent::MovementIntent;
use crate::character::{AnimationRequest, CharacterMotion, CharacterRoot, ClipName};
use bevy::prelude::*;

/// Translate w/a/s/d/space edges into intent changes and animation
/// requests. A no-op until the character exists.
pub fn read_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<MovementIntent>,
    characters: Query<&CharacterMotion, With<CharacterRoot>>,
    mut animation_requests: MessageWriter<AnimationRequest>,
) {
    let Ok(motion) = characters.single() else {
        return;
    };

    if keys.just_pressed(KeyCode::KeyW) {
        intent.forward = 1.0;
        animation_requests.write(AnimationRequest(ClipName::Walk));
    }
    if keys.just_pressed(KeyCode::KeyS) {
        intent.forward = -1.0;
        animation_requests.write(AnimationRequest(ClipName::Backwards));
    }
    if keys.just_pressed(KeyCode::KeyA) {
        intent.rotate_left = true;
    }
    if keys.just_pressed(KeyCode::KeyD) {
        intent.rotate_right = true;
    }
    if keys.just_pressed(KeyCode::Space) && !motion.is_jumping {
        intent.jump_pressed = true;
        intent.jump_held = true;
        animation_requests.write(AnimationRequest(ClipName::Jump));
    }

    let mut released = false;
    if keys.just_released(KeyCode::KeyW) || keys.just_released(KeyCode::KeyS) {
        intent.forward = 0.0;
        released = true;
    }
    if keys.just_released(KeyCode::Space) {
        intent.jump_released = true;
        intent.jump_held = false;
        released = true;
    }

    if released && intent.forward == 0.0 {
        animation_requests.write(AnimationRequest(ClipName::Idle));
    }
}
