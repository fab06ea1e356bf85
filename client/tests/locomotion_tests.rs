use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, Mesh3d, PrimitiveTopology};
use bevy::prelude::*;

use client::character::movement::{
    FORWARD_STEP, GRAVITY_STEP, JUMP_VELOCITY, YAW_STEP, integrate_character_movement,
};
use client::character::{ActiveClip, AnimationRequest, CharacterMotion, CharacterRoot};
use client::ground::Terrain;
use client::input::MovementIntent;

fn locomotion_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, bevy::asset::AssetPlugin::default()))
        .init_asset::<Mesh>()
        .add_message::<AnimationRequest>()
        .init_resource::<MovementIntent>()
        .add_systems(Update, integrate_character_movement);
    app
}

fn spawn_character(app: &mut App, height: f32) -> Entity {
    app.world_mut()
        .spawn((
            CharacterRoot,
            CharacterMotion::default(),
            ActiveClip::default(),
            Transform::from_xyz(0.0, height, 0.0),
        ))
        .id()
}

fn flat_terrain_mesh(half_extent: f32, height: f32) -> Mesh {
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(
        Mesh::ATTRIBUTE_POSITION,
        vec![
            [-half_extent, height, -half_extent],
            [half_extent, height, -half_extent],
            [half_extent, height, half_extent],
            [-half_extent, height, half_extent],
        ],
    )
    .with_inserted_indices(Indices::U32(vec![0, 1, 2, 0, 2, 3]))
}

fn spawn_flat_terrain(app: &mut App, height: f32) {
    let mesh = flat_terrain_mesh(50.0, height);
    let handle = app.world_mut().resource_mut::<Assets<Mesh>>().add(mesh);
    app.world_mut()
        .spawn((Terrain, Mesh3d(handle), GlobalTransform::IDENTITY));
}

fn motion(app: &App, character: Entity) -> (Vec3, f32, f32, bool) {
    let transform = app.world().entity(character).get::<Transform>().unwrap();
    let motion = app
        .world()
        .entity(character)
        .get::<CharacterMotion>()
        .unwrap();
    (
        transform.translation,
        motion.forward_speed,
        motion.vertical_velocity,
        motion.is_jumping,
    )
}

#[test]
fn forward_speed_is_always_one_of_three_values() {
    let mut app = locomotion_app();
    let character = spawn_character(&mut app, 0.0);
    spawn_flat_terrain(&mut app, 0.0);

    for forward in [1.0, -1.0, 0.0, 1.0, 1.0, -1.0, 0.0] {
        app.world_mut().resource_mut::<MovementIntent>().forward = forward;
        app.update();
        let (_, forward_speed, _, _) = motion(&app, character);
        assert!(
            forward_speed == FORWARD_STEP || forward_speed == -FORWARD_STEP || forward_speed == 0.0,
            "unexpected forward speed {forward_speed}"
        );
        assert_eq!(forward_speed, forward * FORWARD_STEP);
    }
}

#[test]
fn character_walks_along_its_facing_direction() {
    let mut app = locomotion_app();
    let character = spawn_character(&mut app, 0.0);
    spawn_flat_terrain(&mut app, 0.0);

    app.world_mut().resource_mut::<MovementIntent>().forward = 1.0;
    for _ in 0..10 {
        app.update();
    }

    let (position, _, _, _) = motion(&app, character);
    // Default facing is -Z; ten frames of one step each.
    assert!((position.z - (-10.0 * FORWARD_STEP)).abs() < 1e-4);
    assert_eq!(position.x, 0.0);
    assert_eq!(position.y, 0.0);
}

#[test]
fn rotation_steps_apply_once_per_flagged_frame() {
    let mut app = locomotion_app();
    let character = spawn_character(&mut app, 0.0);
    spawn_flat_terrain(&mut app, 0.0);

    app.world_mut().resource_mut::<MovementIntent>().rotate_left = true;
    app.update();
    // Flag was consumed; a frame without input must not rotate further.
    app.update();

    let transform = app.world().entity(character).get::<Transform>().unwrap();
    let expected = Quat::from_rotation_y(YAW_STEP);
    assert!(transform.rotation.angle_between(expected) < 1e-4);
}

#[test]
fn dropped_character_converges_to_terrain_height() {
    let mut app = locomotion_app();
    let character = spawn_character(&mut app, 10.0);
    spawn_flat_terrain(&mut app, 0.0);

    let mut landed_frame = None;
    for frame in 0..200 {
        app.update();
        let (position, _, vertical_velocity, _) = motion(&app, character);
        if position.y == 0.0 {
            // Velocity resets on the exact frame contact is detected.
            assert_eq!(vertical_velocity, 0.0);
            landed_frame = Some(frame);
            break;
        }
        assert!(vertical_velocity < 0.0, "falling velocity must accumulate");
    }

    let landed_frame = landed_frame.expect("character never reached the terrain");
    assert!(landed_frame > 10, "drop from 10 units cannot land instantly");

    // Settled: stays snapped with zeroed velocity.
    app.update();
    let (position, _, vertical_velocity, is_jumping) = motion(&app, character);
    assert_eq!(position.y, 0.0);
    assert_eq!(vertical_velocity, 0.0);
    assert!(!is_jumping);
}

#[test]
fn character_free_falls_without_terrain() {
    let mut app = locomotion_app();
    let character = spawn_character(&mut app, 10.0);

    for frame in 1..=50 {
        app.update();
        let (_, _, vertical_velocity, _) = motion(&app, character);
        assert!((vertical_velocity - (-GRAVITY_STEP * frame as f32)).abs() < 1e-4);
    }
    let (position, _, _, _) = motion(&app, character);
    assert!(position.y < 10.0 - 5.0, "no ground means no snap, ever");
}

#[test]
fn jump_launches_rises_and_lands() {
    let mut app = locomotion_app();
    let character = spawn_character(&mut app, 0.0);
    spawn_flat_terrain(&mut app, 0.0);

    // Settle onto the ground first.
    app.update();

    app.world_mut()
        .resource_mut::<MovementIntent>()
        .jump_pressed = true;
    app.update();

    let (position, _, vertical_velocity, is_jumping) = motion(&app, character);
    assert!(is_jumping);
    assert_eq!(vertical_velocity, JUMP_VELOCITY - GRAVITY_STEP);
    assert!(position.y > 0.0);

    let mut landed = false;
    for _ in 0..200 {
        app.update();
        let (position, _, vertical_velocity, is_jumping) = motion(&app, character);
        if position.y == 0.0 && !is_jumping {
            assert_eq!(vertical_velocity, 0.0);
            landed = true;
            break;
        }
    }
    assert!(landed, "jump arc must return to the ground");
}

#[test]
fn jump_cannot_retrigger_while_airborne() {
    let mut app = locomotion_app();
    let character = spawn_character(&mut app, 0.0);
    spawn_flat_terrain(&mut app, 0.0);
    app.update();

    app.world_mut()
        .resource_mut::<MovementIntent>()
        .jump_pressed = true;
    app.update();
    let (_, _, first_velocity, _) = motion(&app, character);

    // A second press while airborne is ignored: velocity keeps decaying
    // instead of resetting to the launch value.
    app.world_mut()
        .resource_mut::<MovementIntent>()
        .jump_pressed = true;
    app.update();
    let (_, _, second_velocity, is_jumping) = motion(&app, character);
    assert!(is_jumping);
    assert_eq!(second_velocity, first_velocity - GRAVITY_STEP);
}

#[test]
fn releasing_jump_midair_kills_vertical_velocity() {
    let mut app = locomotion_app();
    let character = spawn_character(&mut app, 0.0);
    spawn_flat_terrain(&mut app, 0.0);
    app.update();

    app.world_mut()
        .resource_mut::<MovementIntent>()
        .jump_pressed = true;
    app.update();

    app.world_mut()
        .resource_mut::<MovementIntent>()
        .jump_released = true;
    app.update();

    let (_, _, vertical_velocity, is_jumping) = motion(&app, character);
    assert!(!is_jumping);
    // Release zeroes the velocity, then this frame's gravity applies.
    assert_eq!(vertical_velocity, -GRAVITY_STEP);
}

#[test]
fn update_is_a_no_op_without_a_character() {
    let mut app = locomotion_app();
    spawn_flat_terrain(&mut app, 0.0);

    app.world_mut().resource_mut::<MovementIntent>().forward = 1.0;
    app.update();
    app.update();
    // Nothing to assert beyond "does not panic": no character, no state.
}
