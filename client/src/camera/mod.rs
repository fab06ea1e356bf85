use crate::character::CharacterRoot;
use bevy::camera::{PerspectiveProjection, Projection};
use bevy::prelude::*;

/// Local offset behind and above the character, rotated by its yaw.
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 4.0, 8.0);
/// Fraction of the remaining distance closed per frame.
///
/// Frame-constant smoothing, same fixed-timestep simplification as the
/// locomotion step.
pub const CAMERA_SMOOTHING: f32 = 0.1;
/// The camera looks at a point this far above the character origin.
pub const LOOK_AT_HEIGHT: f32 = 2.0;

/// Marker for the rig-driven world camera.
#[derive(Component)]
pub struct FollowCamera;

/// Raw camera-position offset from the touch joystick, applied before the
/// smoothing step so it decays over the following frames.
#[derive(Resource, Default)]
pub struct CameraNudge(pub Vec2);

pub fn spawn_world_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        FollowCamera,
    ));
}

/// Smoothed third-person follow. Owns the camera entirely while a
/// character exists; does nothing before then.
pub fn follow_character_camera(
    nudge: Res<CameraNudge>,
    characters: Query<&Transform, (With<CharacterRoot>, Without<FollowCamera>)>,
    mut cameras: Query<&mut Transform, With<FollowCamera>>,
) {
    let Ok(character) = characters.single() else {
        return;
    };
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };

    camera.translation += Vec3::new(nudge.0.x, 0.0, nudge.0.y);

    let target = follow_target(character.translation, character.rotation);
    camera.translation = camera.translation.lerp(target, CAMERA_SMOOTHING);
    let focus = character.translation + Vec3::Y * LOOK_AT_HEIGHT;
    camera.look_at(focus, Vec3::Y);
}

/// World-space position the camera settles toward for a given character
/// transform.
pub fn follow_target(position: Vec3, rotation: Quat) -> Vec3 {
    position + rotation * CAMERA_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_target_sits_behind_and_above() {
        let target = follow_target(Vec3::new(1.0, 0.0, 1.0), Quat::IDENTITY);
        assert_eq!(target, Vec3::new(1.0, 4.0, 9.0));
    }

    #[test]
    fn follow_target_rotates_with_character_yaw() {
        let target = follow_target(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::PI));
        assert!((target - Vec3::new(0.0, 4.0, -8.0)).length() < 1e-4);
    }
}
