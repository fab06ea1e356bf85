use crate::character::ClipName;
use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, AsyncReadExt, LoadContext};
use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Path of the scene manifest inside the asset root.
pub const SCENE_MANIFEST_PATH: &str = "demo.scene.json";

fn default_scale() -> f32 {
    1.0
}

/// JSON description of the demo scene: which assets to stream and where to
/// put the character.
#[derive(Asset, TypePath, Deserialize, Clone)]
pub struct SceneManifest {
    pub clear_color: [f32; 3],
    pub terrain: TerrainEntry,
    pub character: CharacterEntry,
    pub clips: ClipPaths,
}

#[derive(Deserialize, Clone)]
pub struct TerrainEntry {
    pub path: String,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

#[derive(Deserialize, Clone)]
pub struct CharacterEntry {
    pub path: String,
    #[serde(default = "default_scale")]
    pub scale: f32,
    pub spawn: [f32; 3],
}

#[derive(Deserialize, Clone)]
pub struct ClipPaths {
    pub idle: String,
    pub walk: String,
    pub backwards: String,
    pub jump: String,
}

impl SceneManifest {
    pub fn clear_color(&self) -> Color {
        Color::srgb(
            self.clear_color[0],
            self.clear_color[1],
            self.clear_color[2],
        )
    }
}

impl ClipPaths {
    pub fn entries(&self) -> [(ClipName, &str); 4] {
        [
            (ClipName::Idle, self.idle.as_str()),
            (ClipName::Walk, self.walk.as_str()),
            (ClipName::Backwards, self.backwards.as_str()),
            (ClipName::Jump, self.jump.as_str()),
        ]
    }
}

#[derive(Default, TypePath)]
pub struct SceneManifestLoader;

#[derive(Debug, Error)]
pub enum SceneManifestLoaderError {
    #[error("Could not load scene manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AssetLoader for SceneManifestLoader {
    type Asset = SceneManifest;
    type Settings = ();
    type Error = SceneManifestLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let manifest = serde_json::from_slice::<SceneManifest>(&bytes)?;
        Ok(manifest)
    }

    fn extensions(&self) -> &[&str] {
        &["scene.json"]
    }
}
