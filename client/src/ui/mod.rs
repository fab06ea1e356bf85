use crate::app::state::AppState;
use crate::input::touch::{JOYSTICK_RADIUS, TouchAction, TouchButton};
use crate::scene::WorldAssets;
use crate::settings::{GameSettings, TouchUiSetting};
use bevy::prelude::*;

const BUTTON_SIZE: f32 = 64.0;
const BUTTON_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.25);
const NOTICE_COLOR: Color = Color::srgb(0.9, 0.25, 0.2);

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Loading), spawn_loading_indicator)
            .add_systems(OnExit(AppState::Loading), despawn_loading_indicator)
            .add_systems(
                OnEnter(AppState::InWorld),
                (spawn_load_failure_notice, spawn_touch_overlay),
            )
            .add_systems(
                Update,
                reveal_touch_overlay_on_first_touch.run_if(in_state(AppState::InWorld)),
            );
    }
}

#[derive(Component)]
struct LoadingIndicator;

/// Marker for the touch overlay root node.
#[derive(Component)]
struct TouchOverlayRoot;

fn spawn_loading_indicator(mut commands: Commands) {
    commands.spawn((
        LoadingIndicator,
        Text::new("Loading..."),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(46.0),
            top: Val::Percent(45.0),
            ..default()
        },
    ));
}

fn despawn_loading_indicator(
    mut commands: Commands,
    indicators: Query<Entity, With<LoadingIndicator>>,
) {
    for entity in &indicators {
        commands.entity(entity).despawn();
    }
}

fn spawn_load_failure_notice(mut commands: Commands, world_assets: Option<Res<WorldAssets>>) {
    let character_failed = world_assets
        .map(|assets| assets.character.is_failed())
        .unwrap_or(false);
    if !character_failed {
        return;
    }

    commands.spawn((
        Text::new("Character failed to load"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(NOTICE_COLOR),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(42.0),
            top: Val::Px(14.0),
            ..default()
        },
    ));
}

fn spawn_touch_overlay(mut commands: Commands, settings: Res<GameSettings>) {
    let visibility = match settings.controls.touch_ui {
        TouchUiSetting::Always => Visibility::Visible,
        TouchUiSetting::Auto => Visibility::Hidden,
        TouchUiSetting::Hidden => return,
    };

    let root = commands
        .spawn((
            TouchOverlayRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            visibility,
        ))
        .id();

    // Directional pad, bottom left: forward on top, rotate/backward/rotate
    // underneath.
    let pad = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(40.0),
                bottom: Val::Px(40.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(8.0),
                ..default()
            },
            ChildOf(root),
        ))
        .id();
    spawn_touch_button(&mut commands, pad, TouchAction::Forward, "^");
    let pad_row = commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(8.0),
                ..default()
            },
            ChildOf(pad),
        ))
        .id();
    spawn_touch_button(&mut commands, pad_row, TouchAction::RotateLeft, "<");
    spawn_touch_button(&mut commands, pad_row, TouchAction::Backward, "v");
    spawn_touch_button(&mut commands, pad_row, TouchAction::RotateRight, ">");

    // Jump sits above the joystick pad on the right.
    let jump_anchor = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(88.0),
                bottom: Val::Px(230.0),
                ..default()
            },
            ChildOf(root),
        ))
        .id();
    spawn_touch_button(&mut commands, jump_anchor, TouchAction::Jump, "JUMP");

    // Joystick hit-area marker, bottom right. The joystick itself is read
    // from raw touches, this node only shows where it lives.
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(40.0),
            bottom: Val::Px(40.0),
            width: Val::Px(JOYSTICK_RADIUS * 2.0),
            height: Val::Px(JOYSTICK_RADIUS * 2.0),
            border_radius: BorderRadius::MAX,
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.12)),
        ChildOf(root),
    ));
}

fn spawn_touch_button(commands: &mut Commands, parent: Entity, action: TouchAction, label: &str) {
    let button = commands
        .spawn((
            Button,
            TouchButton(action),
            Node {
                width: Val::Px(BUTTON_SIZE),
                height: Val::Px(BUTTON_SIZE),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border_radius: BorderRadius::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(BUTTON_BACKGROUND),
            ChildOf(parent),
        ))
        .id();
    commands.spawn((
        Text::new(label),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        ChildOf(button),
    ));
}

/// With `touch_ui: auto`, keep the overlay hidden until the platform
/// actually produces a touch.
fn reveal_touch_overlay_on_first_touch(
    touches: Res<Touches>,
    mut overlays: Query<&mut Visibility, With<TouchOverlayRoot>>,
) {
    if touches.iter().next().is_none() {
        return;
    }
    for mut visibility in &mut overlays {
        if *visibility == Visibility::Hidden {
            *visibility = Visibility::Visible;
        }
    }
}
