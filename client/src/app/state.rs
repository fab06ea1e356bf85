use bevy::prelude::*;

/// Loading covers the window between startup and the character scene
/// resolving (successfully or not); world systems run in both states.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Loading,
    InWorld,
}
