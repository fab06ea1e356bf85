use bevy::prelude::*;

use crate::camera::{CameraNudge, follow_character_camera, spawn_world_camera};
use crate::character::{
    AnimationRequest, apply_animation_requests, bind_character_animation_players,
    create_clip_library, integrate_character_movement, register_loaded_clips,
    settle_finished_jump, start_idle_when_ready,
};
use crate::input::{
    MovementIntent, TouchControls, fold_touch_intent, read_keyboard_input, read_touch_buttons,
    read_touch_joystick,
};
use crate::pipeline::UpdatePipeline;
use crate::scene::{
    SceneManifest, SceneManifestLoader, initialize_world_assets, request_scene_manifest,
    spawn_character_when_ready, spawn_scene_lighting, spawn_terrain_when_ready,
};

pub fn register_demo_systems(app: &mut App) {
    app.init_asset::<SceneManifest>()
        .init_asset_loader::<SceneManifestLoader>()
        .add_message::<AnimationRequest>()
        .init_resource::<MovementIntent>()
        .init_resource::<TouchControls>()
        .init_resource::<CameraNudge>()
        .configure_sets(
            Update,
            (
                UpdatePipeline::Load,
                UpdatePipeline::Spawn,
                UpdatePipeline::Input,
                UpdatePipeline::Simulate,
                UpdatePipeline::Camera,
            )
                .chain(),
        )
        .add_systems(
            Startup,
            (
                spawn_world_camera,
                spawn_scene_lighting,
                create_clip_library,
                request_scene_manifest,
            ),
        )
        .add_systems(
            Update,
            (initialize_world_assets, register_loaded_clips).in_set(UpdatePipeline::Load),
        )
        .add_systems(
            Update,
            (
                spawn_terrain_when_ready,
                spawn_character_when_ready,
                bind_character_animation_players,
                start_idle_when_ready,
            )
                .in_set(UpdatePipeline::Spawn),
        )
        .add_systems(
            Update,
            (
                read_keyboard_input,
                read_touch_buttons,
                read_touch_joystick,
                fold_touch_intent,
            )
                .chain()
                .in_set(UpdatePipeline::Input),
        )
        .add_systems(
            Update,
            (
                integrate_character_movement,
                apply_animation_requests,
                settle_finished_jump,
            )
                .chain()
                .in_set(UpdatePipeline::Simulate),
        )
        .add_systems(
            Update,
            follow_character_camera.in_set(UpdatePipeline::Camera),
        );
}
