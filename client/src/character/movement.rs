use super::animation::AnimationRequest;
use super::types::{ActiveClip, CharacterMotion, CharacterRoot, ClipName};
use crate::ground::{self, Terrain};
use crate::input::MovementIntent;
use bevy::prelude::*;

/// Horizontal displacement per frame while a direction is held.
///
/// Displacement is deliberately frame-constant rather than scaled by delta
/// time; the drop-and-land and jump arcs below assume a fixed step per
/// frame. Scaling by delta time would make them framerate independent but
/// changes every tuning value here.
pub const FORWARD_STEP: f32 = 0.05;
/// Yaw applied per rotate keypress (desktop) or per held frame (touch).
pub const YAW_STEP: f32 = 0.07;
/// Subtracted from vertical velocity every frame, grounded or not.
pub const GRAVITY_STEP: f32 = 0.01;
/// Vertical velocity at the moment a jump launches.
pub const JUMP_VELOCITY: f32 = 0.3;
/// The ground probe ray starts this far above the character origin.
pub const GROUND_RAY_HEIGHT: f32 = 5.0;
/// Hits farther than this along the probe ray leave the character airborne.
pub const MAX_GROUND_DISTANCE: f32 = 5.2;

/// Advance character position, heading and vertical velocity from the
/// aggregated intent, then resolve the ground constraint.
pub fn integrate_character_movement(
    mut intent: ResMut<MovementIntent>,
    mut characters: Query<(&mut Transform, &mut CharacterMotion, &ActiveClip), With<CharacterRoot>>,
    terrain_roots: Query<Entity, With<Terrain>>,
    children: Query<&Children>,
    mesh_instances: Query<(&Mesh3d, &GlobalTransform)>,
    meshes: Res<Assets<Mesh>>,
    mut animation_requests: MessageWriter<AnimationRequest>,
) {
    let events = intent.take_frame_events();

    for (mut transform, mut motion, active) in &mut characters {
        motion.forward_speed = intent.forward * FORWARD_STEP;

        if events.rotate_left {
            transform.rotate_y(YAW_STEP);
        }
        if events.rotate_right {
            transform.rotate_y(-YAW_STEP);
        }

        if events.jump_pressed && !motion.is_jumping {
            motion.is_jumping = true;
            motion.vertical_velocity = JUMP_VELOCITY;
        }
        if events.jump_released {
            motion.is_jumping = false;
            motion.vertical_velocity = 0.0;
        }

        motion.vertical_velocity -= GRAVITY_STEP;

        let mut forward = transform.rotation * Vec3::NEG_Z;
        forward.y = 0.0;
        let forward = forward.normalize_or_zero();
        transform.translation += forward * motion.forward_speed;
        transform.translation.y += motion.vertical_velocity;

        let origin = transform.translation + Vec3::Y * GROUND_RAY_HEIGHT;
        let hit = terrain_roots
            .iter()
            .filter_map(|root| {
                ground::cast_down(
                    origin,
                    MAX_GROUND_DISTANCE,
                    root,
                    &children,
                    &mesh_instances,
                    &meshes,
                )
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance));

        if let Some(hit) = hit {
            transform.translation.y = hit.point.y;
            motion.vertical_velocity = 0.0;
            motion.is_jumping = false;
            if active.current == Some(ClipName::Jump) {
                animation_requests.write(AnimationRequest(ClipName::Idle));
            }
        }
    }
}
