use super::manifest::{SCENE_MANIFEST_PATH, SceneManifest};
use crate::app::state::AppState;
use crate::character::{CharacterFactory, ClipLibrary};
use crate::ground::Terrain;
use bevy::asset::LoadState;
use bevy::prelude::*;

/// Lifecycle of one tracked asset. Loads resolve independently and out of
/// order; a failed load leaves the resource absent for the session.
pub enum AssetState<A: Asset> {
    Pending(Handle<A>),
    Ready,
    Failed,
}

impl<A: Asset> AssetState<A> {
    pub fn pending_handle(&self) -> Option<Handle<A>> {
        match self {
            AssetState::Pending(handle) => Some(handle.clone()),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AssetState::Failed)
    }
}

/// Handle of the scene manifest, requested at startup.
#[derive(Resource)]
pub struct SceneManifestHandle(pub Handle<SceneManifest>);

/// Tracked world assets plus the spawn parameters lifted out of the
/// manifest. Inserted once the manifest resolves (or fails).
#[derive(Resource)]
pub struct WorldAssets {
    pub terrain: AssetState<Scene>,
    pub character: AssetState<Scene>,
    pub terrain_scale: f32,
    pub character_scale: f32,
    pub character_spawn: Vec3,
}

pub fn request_scene_manifest(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SceneManifestHandle(asset_server.load(SCENE_MANIFEST_PATH)));
}

/// Turn the resolved manifest into tracked scene/clip requests. If the
/// manifest itself fails there is nothing to stream: both scenes are marked
/// failed and the session continues with an empty world.
pub fn initialize_world_assets(
    mut commands: Commands,
    manifest_handle: Res<SceneManifestHandle>,
    manifests: Res<Assets<SceneManifest>>,
    asset_server: Res<AssetServer>,
    mut library: ResMut<ClipLibrary>,
    world_assets: Option<Res<WorldAssets>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if world_assets.is_some() {
        return;
    }

    if let Some(manifest) = manifests.get(&manifest_handle.0) {
        let terrain: Handle<Scene> =
            asset_server.load(format!("{}#Scene0", manifest.terrain.path));
        let character: Handle<Scene> =
            asset_server.load(format!("{}#Scene0", manifest.character.path));
        for (name, path) in manifest.clips.entries() {
            library.queue(name, asset_server.load(format!("{path}#Animation0")));
        }

        commands.insert_resource(ClearColor(manifest.clear_color()));
        commands.insert_resource(WorldAssets {
            terrain: AssetState::Pending(terrain),
            character: AssetState::Pending(character),
            terrain_scale: manifest.terrain.scale,
            character_scale: manifest.character.scale,
            character_spawn: Vec3::from(manifest.character.spawn),
        });
        info!(
            "Scene manifest loaded; streaming terrain '{}' and character '{}'",
            manifest.terrain.path, manifest.character.path
        );
    } else if matches!(
        asset_server.get_load_state(manifest_handle.0.id()),
        Some(LoadState::Failed(_))
    ) {
        error!("Scene manifest '{SCENE_MANIFEST_PATH}' failed to load");
        commands.insert_resource(WorldAssets {
            terrain: AssetState::Failed,
            character: AssetState::Failed,
            terrain_scale: 1.0,
            character_scale: 1.0,
            character_spawn: Vec3::ZERO,
        });
        next_state.set(AppState::InWorld);
    }
}

/// Spawn the terrain scene once its asset resolves. On failure the ground
/// query simply never finds anything to hit.
pub fn spawn_terrain_when_ready(
    mut commands: Commands,
    world_assets: Option<ResMut<WorldAssets>>,
    scenes: Res<Assets<Scene>>,
    asset_server: Res<AssetServer>,
) {
    let Some(mut world_assets) = world_assets else {
        return;
    };
    let Some(handle) = world_assets.terrain.pending_handle() else {
        return;
    };

    if scenes.contains(&handle) {
        commands.spawn((
            Terrain,
            SceneRoot(handle),
            Transform::from_scale(Vec3::splat(world_assets.terrain_scale)),
            Visibility::default(),
        ));
        info!("Terrain scene spawned");
        world_assets.terrain = AssetState::Ready;
    } else if matches!(
        asset_server.get_load_state(handle.id()),
        Some(LoadState::Failed(_))
    ) {
        warn!("Terrain scene failed to load; ground snapping is disabled for this session");
        world_assets.terrain = AssetState::Failed;
    }
}

/// Spawn the character once its scene resolves and leave the loading
/// state. Failure also leaves the loading state, with the HUD switching to
/// an error line instead of keeping the indicator up forever.
pub fn spawn_character_when_ready(
    mut commands: Commands,
    world_assets: Option<ResMut<WorldAssets>>,
    scenes: Res<Assets<Scene>>,
    asset_server: Res<AssetServer>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(mut world_assets) = world_assets else {
        return;
    };
    let Some(handle) = world_assets.character.pending_handle() else {
        return;
    };

    if scenes.contains(&handle) {
        let spawn = world_assets.character_spawn;
        CharacterFactory::spawn(&mut commands, handle, spawn, world_assets.character_scale);
        info!("Character spawned at {spawn:?}");
        world_assets.character = AssetState::Ready;
        next_state.set(AppState::InWorld);
    } else if matches!(
        asset_server.get_load_state(handle.id()),
        Some(LoadState::Failed(_))
    ) {
        error!("Character scene failed to load; the world stays empty");
        world_assets.character = AssetState::Failed;
        next_state.set(AppState::InWorld);
    }
}
