use super::types::{ActiveClip, CharacterMotion, CharacterRoot, ClipName};
use bevy::asset::LoadState;
use bevy::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

/// Crossfade window for every clip transition.
pub const CROSSFADE: Duration = Duration::from_millis(300);

/// Fire-and-forget request to make a named clip the active one.
#[derive(Message)]
pub struct AnimationRequest(pub ClipName);

/// Shared clip library: one animation graph, populated incrementally as
/// each clip asset resolves. Requests for names not yet registered are
/// ignored, so the machine is callable from the first frame.
#[derive(Resource)]
pub struct ClipLibrary {
    pub graph: Handle<AnimationGraph>,
    pending: Vec<(ClipName, Handle<AnimationClip>)>,
    nodes: HashMap<ClipName, AnimationNodeIndex>,
}

impl ClipLibrary {
    pub fn new(graph: Handle<AnimationGraph>) -> Self {
        Self {
            graph,
            pending: Vec::new(),
            nodes: HashMap::new(),
        }
    }

    /// Queue a clip asset for registration once it finishes loading.
    pub fn queue(&mut self, name: ClipName, clip: Handle<AnimationClip>) {
        self.pending.push((name, clip));
    }

    /// Register a loaded clip under its name.
    pub fn register(&mut self, name: ClipName, node: AnimationNodeIndex) {
        self.nodes.insert(name, node);
    }

    pub fn node(&self, name: ClipName) -> Option<AnimationNodeIndex> {
        self.nodes.get(&name).copied()
    }

    pub fn is_registered(&self, name: ClipName) -> bool {
        self.nodes.contains_key(&name)
    }
}

/// Allocate the shared animation graph at startup, before any clip loads.
pub fn create_clip_library(mut commands: Commands, mut graphs: ResMut<Assets<AnimationGraph>>) {
    commands.insert_resource(ClipLibrary::new(graphs.add(AnimationGraph::new())));
}

/// Fold clip assets into the graph as their loads resolve, in whatever
/// order they arrive. A failed clip load is reported and that name stays
/// unregistered for the session.
pub fn register_loaded_clips(
    mut library: ResMut<ClipLibrary>,
    clips: Res<Assets<AnimationClip>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    asset_server: Res<AssetServer>,
) {
    if library.pending.is_empty() {
        return;
    }
    let graph_handle = library.graph.clone();
    let Some(graph) = graphs.get_mut(&graph_handle) else {
        return;
    };

    let pending = std::mem::take(&mut library.pending);
    for (name, handle) in pending {
        if clips.contains(&handle) {
            let node = graph.add_clip(handle.clone(), 1.0, graph.root);
            library.register(name, node);
            info!("Animation '{}' loaded", name.label());
        } else if matches!(
            asset_server.get_load_state(handle.id()),
            Some(LoadState::Failed(_))
        ) {
            warn!(
                "Animation '{}' failed to load and will be unavailable",
                name.label()
            );
        } else {
            library.pending.push((name, handle));
        }
    }
}

/// What a request resolves to against the current machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipTransition {
    Ignore,
    Crossfade {
        node: AnimationNodeIndex,
        looped: bool,
    },
}

/// Transition table for `request(name)`: unregistered names are ignored,
/// re-requesting the active clip is a no-op, jump always replaces and plays
/// once holding its final pose, everything else crossfades and loops.
pub fn transition_for(
    current: Option<ClipName>,
    requested: ClipName,
    library: &ClipLibrary,
) -> ClipTransition {
    let Some(node) = library.node(requested) else {
        return ClipTransition::Ignore;
    };
    if requested != ClipName::Jump && current == Some(requested) {
        return ClipTransition::Ignore;
    }
    ClipTransition::Crossfade {
        node,
        looped: requested != ClipName::Jump,
    }
}

/// Marker for animation players already attached to the shared graph.
#[derive(Component)]
pub struct CharacterAnimationBound;

/// Attach the shared graph to animation players that appear in a character
/// subtree once its scene instance spawns, resuming the active clip.
pub fn bind_character_animation_players(
    mut commands: Commands,
    library: Res<ClipLibrary>,
    characters: Query<&ActiveClip, With<CharacterRoot>>,
    parents: Query<&ChildOf>,
    mut players: Query<(Entity, &mut AnimationPlayer), Without<CharacterAnimationBound>>,
) {
    for (entity, mut player) in &mut players {
        let Some(active) = owning_character(entity, &parents, &characters) else {
            continue;
        };

        let mut transitions = AnimationTransitions::new();
        if let Some(name) = active.current {
            if let Some(node) = library.node(name) {
                let animation = transitions.play(&mut player, node, Duration::ZERO);
                if name != ClipName::Jump {
                    animation.repeat();
                }
            }
        }

        commands.entity(entity).insert((
            AnimationGraphHandle(library.graph.clone()),
            transitions,
            CharacterAnimationBound,
        ));
    }
}

/// Apply queued animation requests to every bound player under each
/// character root, transferring `ActiveClip` ownership at request time.
pub fn apply_animation_requests(
    library: Res<ClipLibrary>,
    mut requests: MessageReader<AnimationRequest>,
    mut characters: Query<(Entity, &mut ActiveClip), With<CharacterRoot>>,
    children: Query<&Children>,
    mut players: Query<(&mut AnimationPlayer, &mut AnimationTransitions), With<CharacterAnimationBound>>,
) {
    for AnimationRequest(requested) in requests.read() {
        for (root, mut active) in &mut characters {
            let ClipTransition::Crossfade { node, looped } =
                transition_for(active.current, *requested, &library)
            else {
                continue;
            };

            active.current = Some(*requested);
            for player_entity in players_in_subtree(root, &children, |e| players.contains(e)) {
                if let Ok((mut player, mut transitions)) = players.get_mut(player_entity) {
                    let animation = transitions.play(&mut player, node, CROSSFADE);
                    if looped {
                        animation.repeat();
                    }
                }
            }
        }
    }
}

/// Once the one-shot jump clip finishes, fall back to idle unless the
/// character is still flagged as jumping; in that case the held pose stays
/// until a later evaluation passes.
pub fn settle_finished_jump(
    library: Res<ClipLibrary>,
    characters: Query<(Entity, &ActiveClip, &CharacterMotion), With<CharacterRoot>>,
    children: Query<&Children>,
    players: Query<&AnimationPlayer, With<CharacterAnimationBound>>,
    mut requests: MessageWriter<AnimationRequest>,
) {
    let Some(jump_node) = library.node(ClipName::Jump) else {
        return;
    };

    for (root, active, motion) in &characters {
        if active.current != Some(ClipName::Jump) || motion.is_jumping {
            continue;
        }

        let finished = players_in_subtree(root, &children, |e| players.contains(e))
            .into_iter()
            .filter_map(|entity| players.get(entity).ok())
            .any(|player| {
                player
                    .animation(jump_node)
                    .is_some_and(|animation| animation.is_finished())
            });

        if finished {
            requests.write(AnimationRequest(ClipName::Idle));
        }
    }
}

/// Start idle once both the character and the idle clip exist; covers idle
/// resolving before or after the character scene.
pub fn start_idle_when_ready(
    library: Res<ClipLibrary>,
    characters: Query<&ActiveClip, With<CharacterRoot>>,
    mut requests: MessageWriter<AnimationRequest>,
) {
    if !library.is_registered(ClipName::Idle) {
        return;
    }
    for active in &characters {
        if active.current.is_none() {
            requests.write(AnimationRequest(ClipName::Idle));
        }
    }
}

fn owning_character<'a>(
    entity: Entity,
    parents: &Query<&ChildOf>,
    characters: &'a Query<&ActiveClip, With<CharacterRoot>>,
) -> Option<&'a ActiveClip> {
    let mut current = entity;
    loop {
        if let Ok(active) = characters.get(current) {
            return Some(active);
        }
        current = parents.get(current).ok()?.parent();
    }
}

fn players_in_subtree(
    root: Entity,
    children: &Query<&Children>,
    is_player: impl Fn(Entity) -> bool,
) -> Vec<Entity> {
    let mut result = Vec::new();
    let mut queue = vec![root];
    while let Some(entity) = queue.pop() {
        if is_player(entity) {
            result.push(entity);
        }
        if let Ok(child_entities) = children.get(entity) {
            queue.extend(child_entities.iter());
        }
    }
    result
}
