pub mod animation;
pub mod factory;
pub mod movement;
pub mod types;

pub use animation::{
    AnimationRequest, ClipLibrary, ClipTransition, apply_animation_requests,
    bind_character_animation_players, create_clip_library, register_loaded_clips,
    settle_finished_jump, start_idle_when_ready, transition_for,
};
pub use factory::CharacterFactory;
pub use movement::integrate_character_movement;
pub use types::{ActiveClip, CharacterMotion, CharacterRoot, ClipName};
