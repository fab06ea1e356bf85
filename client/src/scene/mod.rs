pub mod assets;
pub mod lighting;
pub mod manifest;

pub use assets::{
    AssetState, SceneManifestHandle, WorldAssets, initialize_world_assets, request_scene_manifest,
    spawn_character_when_ready, spawn_terrain_when_ready,
};
pub use lighting::spawn_scene_lighting;
pub use manifest::{SCENE_MANIFEST_PATH, SceneManifest, SceneManifestLoader};
