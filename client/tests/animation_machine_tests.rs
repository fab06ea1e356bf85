use bevy::prelude::*;

use client::character::{
    ActiveClip, AnimationRequest, CharacterRoot, ClipLibrary, ClipName, ClipTransition,
    apply_animation_requests, transition_for,
};

fn library_with(clips: &[ClipName]) -> ClipLibrary {
    let mut graph = AnimationGraph::new();
    let mut library = ClipLibrary::new(Handle::default());
    for &name in clips {
        let node = graph.add_clip(Handle::default(), 1.0, graph.root);
        library.register(name, node);
    }
    library
}

#[test]
fn unregistered_clip_requests_are_ignored() {
    let library = library_with(&[ClipName::Idle]);
    assert_eq!(
        transition_for(Some(ClipName::Idle), ClipName::Walk, &library),
        ClipTransition::Ignore
    );
    assert_eq!(
        transition_for(None, ClipName::Jump, &library),
        ClipTransition::Ignore
    );
}

#[test]
fn rerequesting_the_active_clip_does_not_restart_the_fade() {
    let library = library_with(&[ClipName::Walk]);
    assert_eq!(
        transition_for(Some(ClipName::Walk), ClipName::Walk, &library),
        ClipTransition::Ignore
    );
}

#[test]
fn looping_clips_crossfade_and_loop() {
    let library = library_with(&[ClipName::Idle, ClipName::Walk]);
    match transition_for(Some(ClipName::Idle), ClipName::Walk, &library) {
        ClipTransition::Crossfade { looped, .. } => assert!(looped),
        other => panic!("expected a crossfade, got {other:?}"),
    }
}

#[test]
fn jump_always_replaces_and_plays_once() {
    let library = library_with(&[ClipName::Jump]);
    // Even a jump-over-jump request replaces; re-trigger protection lives
    // in the input edge, not here.
    match transition_for(Some(ClipName::Jump), ClipName::Jump, &library) {
        ClipTransition::Crossfade { looped, .. } => assert!(!looped),
        other => panic!("expected a crossfade, got {other:?}"),
    }
}

fn machine_app(library: ClipLibrary) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_message::<AnimationRequest>()
        .insert_resource(library)
        .add_systems(Update, apply_animation_requests);
    let character = app
        .world_mut()
        .spawn((CharacterRoot, ActiveClip::default()))
        .id();
    (app, character)
}

fn active_clip(app: &App, character: Entity) -> Option<ClipName> {
    app.world()
        .entity(character)
        .get::<ActiveClip>()
        .unwrap()
        .current
}

#[test]
fn requests_transfer_active_clip_ownership() {
    let (mut app, character) = machine_app(library_with(&[ClipName::Idle, ClipName::Walk]));

    app.world_mut().write_message(AnimationRequest(ClipName::Walk));
    app.update();
    assert_eq!(active_clip(&app, character), Some(ClipName::Walk));

    app.world_mut().write_message(AnimationRequest(ClipName::Idle));
    app.update();
    assert_eq!(active_clip(&app, character), Some(ClipName::Idle));
}

#[test]
fn requesting_a_clip_that_never_loaded_changes_nothing() {
    let (mut app, character) = machine_app(library_with(&[ClipName::Idle]));

    app.world_mut().write_message(AnimationRequest(ClipName::Idle));
    app.update();
    app.world_mut()
        .write_message(AnimationRequest(ClipName::Backwards));
    app.update();

    assert_eq!(active_clip(&app, character), Some(ClipName::Idle));
}

#[test]
fn machine_behaves_the_same_regardless_of_load_resolution_order() {
    // Walk resolved first even though jump was requested first: the early
    // jump request sees an unregistered name and is dropped, the later one
    // lands once jump registers.
    let (mut app, character) = machine_app(library_with(&[ClipName::Walk]));

    app.world_mut().write_message(AnimationRequest(ClipName::Jump));
    app.update();
    assert_eq!(active_clip(&app, character), None);

    app.world_mut().write_message(AnimationRequest(ClipName::Walk));
    app.update();
    assert_eq!(active_clip(&app, character), Some(ClipName::Walk));

    // Jump's asset resolves late; register it and repeat the request.
    let mut graph = AnimationGraph::new();
    let jump_node = graph.add_clip(Handle::default(), 1.0, graph.root);
    app.world_mut()
        .resource_mut::<ClipLibrary>()
        .register(ClipName::Jump, jump_node);

    app.world_mut().write_message(AnimationRequest(ClipName::Jump));
    app.update();
    assert_eq!(active_clip(&app, character), Some(ClipName::Jump));
}
