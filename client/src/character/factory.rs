use super::types::{ActiveClip, CharacterMotion, CharacterRoot};
use bevy::prelude::*;

pub struct CharacterFactory;

impl CharacterFactory {
    /// Spawn the character root with its locomotion state and the loaded
    /// scene as a scaled child, so the root transform stays a clean
    /// position + yaw pair for the integrator and camera rig.
    pub fn spawn(
        commands: &mut Commands,
        scene: Handle<Scene>,
        position: Vec3,
        scale: f32,
    ) -> Entity {
        let root = commands
            .spawn((
                CharacterRoot,
                CharacterMotion::default(),
                ActiveClip::default(),
                Transform::from_translation(position),
                Visibility::default(),
            ))
            .id();

        let body = commands
            .spawn((
                SceneRoot(scene),
                Transform::from_scale(Vec3::splat(scale)),
                Visibility::default(),
            ))
            .id();
        commands.entity(root).add_child(body);

        root
    }
}
