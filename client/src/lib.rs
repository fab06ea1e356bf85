#![allow(clippy::too_many_arguments, clippy::type_complexity)]

pub mod app;
pub mod camera;
pub mod character;
pub mod ground;
pub mod input;
pub mod pipeline;
pub mod registration;
pub mod scene;
pub mod settings;
pub mod ui;

pub use app::state::AppState;
