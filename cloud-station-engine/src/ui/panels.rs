use crate::audio::preference::SoundPreference;
use crate::engine::assets::info_content::InfoContent;
use crate::engine::systems::tutorial_bubble::TutorialBubble;
use crate::interaction::state::InteractionState;
use crate::ui::state::OverlayState;
use bevy::prelude::*;

const PANEL_COLOUR: Color = Color::srgba(0.10, 0.11, 0.13, 0.85);
const BUTTON_COLOUR: Color = Color::srgb(0.22, 0.24, 0.28);
const TEXT_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);

// Components
#[derive(Component)]
pub struct LoadingOverlay;
#[derive(Component)]
pub struct HillCard;
#[derive(Component)]
pub struct HillCardTitle;
#[derive(Component)]
pub struct HillCardBody;
#[derive(Component)]
pub struct NextButton;
#[derive(Component)]
pub struct ExitZoomButton;
#[derive(Component)]
pub struct TutorialBubbleNode;
#[derive(Component)]
pub struct InstructionCard;
#[derive(Component)]
pub struct InstructionLine(pub usize);
#[derive(Component)]
pub struct DismissInstructionsButton;
#[derive(Component)]
pub struct SoundToggleButton;
#[derive(Component)]
pub struct SoundToggleLabel;
#[derive(Component)]
pub struct HomeButton;

fn text(value: impl Into<String>, size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont { font_size: size, ..default() },
        TextColor(TEXT_COLOUR),
    )
}

fn button_node(width: f32) -> Node {
    Node {
        width: Val::Px(width),
        height: Val::Px(36.0),
        display: Display::Flex,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    }
}

fn spawn_button(parent: &mut ChildSpawnerCommands, marker: impl Component, name: &'static str, label: &str, width: f32) {
    parent
        .spawn((
            marker,
            Button,
            Name::new(name),
            BackgroundColor(BUTTON_COLOUR),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            button_node(width),
        ))
        .with_children(|btn| {
            btn.spawn(text(label, 16.0));
        });
}

// Spawns every overlay hidden except the loading screen
pub fn spawn_overlays(mut commands: Commands, overlay: Res<OverlayState>) {
    commands.spawn((
        LoadingOverlay,
        Name::new("LoadingOverlay"),
        BackgroundColor(Color::srgb(0.05, 0.06, 0.08)),
        GlobalZIndex(10),
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            ..default()
        },
        children![text("Loading...", 24.0)],
    ));

    // Hill card with next / exit controls
    commands
        .spawn((
            HillCard,
            Name::new("HillCard"),
            BackgroundColor(PANEL_COLOUR),
            Node {
                width: Val::Px(320.0),
                position_type: PositionType::Absolute,
                left: Val::Px(24.0),
                bottom: Val::Px(24.0),
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(8.0),
                display: Display::None,
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .with_children(|card| {
            card.spawn((HillCardTitle, text("", 22.0)));
            card.spawn((HillCardBody, text("", 15.0)));
            card.spawn(Node {
                column_gap: Val::Px(8.0),
                ..default()
            })
            .with_children(|row| {
                spawn_button(row, NextButton, "NextButton", "Next", 100.0);
                spawn_button(row, ExitZoomButton, "ExitZoomButton", "Exit", 100.0);
            });
        });

    commands.spawn((
        TutorialBubbleNode,
        Name::new("TutorialBubble"),
        BackgroundColor(PANEL_COLOUR),
        Node {
            position_type: PositionType::Absolute,
            padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
            display: Display::None,
            ..default()
        },
        children![text("Click on a hill", 16.0)],
    ));

    commands
        .spawn((
            InstructionCard,
            Name::new("InstructionCard"),
            BackgroundColor(PANEL_COLOUR),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                left: Val::Px(24.0),
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(6.0),
                display: Display::None,
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .with_children(|card| {
            for (index, line) in overlay.instruction_lines().iter().enumerate() {
                card.spawn((InstructionLine(index), text(*line, 15.0)));
            }
            spawn_button(card, DismissInstructionsButton, "DismissInstructions", "Got it", 100.0);
        });

    // Top-right controls
    commands
        .spawn((
            Name::new("Controls"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                right: Val::Px(24.0),
                column_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|row| {
            spawn_button(row, HomeButton, "HomeButton", "Home", 90.0);
            row.spawn((
                SoundToggleButton,
                Button,
                Name::new("SoundToggle"),
                BackgroundColor(BUTTON_COLOUR),
                BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                button_node(120.0),
            ))
            .with_children(|btn| {
                btn.spawn((SoundToggleLabel, text("Sound: On", 16.0)));
            });
        });
}

pub fn hide_loading_overlay(mut commands: Commands, overlays: Query<Entity, With<LoadingOverlay>>) {
    for overlay in &overlays {
        commands.entity(overlay).despawn();
    }
}

fn display(visible: bool) -> Display {
    if visible { Display::Flex } else { Display::None }
}

pub fn reflect_hill_card(
    state: Res<InteractionState>,
    content: Option<Res<InfoContent>>,
    mut cards: Query<&mut Node, With<HillCard>>,
    mut titles: Query<&mut Text, (With<HillCardTitle>, Without<HillCardBody>)>,
    mut bodies: Query<&mut Text, (With<HillCardBody>, Without<HillCardTitle>)>,
) {
    if !state.is_changed() {
        return;
    }
    let hill = state.current_hill.filter(|_| state.is_zoom_mode);
    for mut node in &mut cards {
        node.display = display(hill.is_some());
    }
    let Some(hill) = hill else {
        return;
    };

    let card = InfoContent::hill_card_or_builtin(content.as_deref(), hill);
    for mut title in &mut titles {
        title.0 = card.title.clone();
    }
    for mut body in &mut bodies {
        body.0 = card.body_text();
    }
}

pub fn reflect_sequence_buttons(
    state: Res<InteractionState>,
    mut next: Query<&mut Node, (With<NextButton>, Without<ExitZoomButton>)>,
    mut exit: Query<&mut Node, (With<ExitZoomButton>, Without<NextButton>)>,
) {
    if !state.is_changed() {
        return;
    }
    for mut node in &mut next {
        node.display = display(state.show_next);
    }
    for mut node in &mut exit {
        node.display = display(state.is_zoom_mode && !state.is_exiting);
    }
}

pub fn reflect_tutorial_bubble(
    bubble: Res<TutorialBubble>,
    mut nodes: Query<&mut Node, With<TutorialBubbleNode>>,
) {
    if !bubble.is_changed() {
        return;
    }
    for mut node in &mut nodes {
        match bubble.screen_position.filter(|_| bubble.visible) {
            Some(position) => {
                node.display = Display::Flex;
                node.left = Val::Px(position.x);
                node.top = Val::Px(position.y);
            }
            None => node.display = Display::None,
        }
    }
}

pub fn reflect_instruction_card(
    overlay: Res<OverlayState>,
    mut cards: Query<&mut Node, With<InstructionCard>>,
    mut lines: Query<(&InstructionLine, &mut Text)>,
) {
    if !overlay.is_changed() {
        return;
    }
    for mut node in &mut cards {
        node.display = display(overlay.instructions_visible);
    }
    let wording = overlay.instruction_lines();
    for (line, mut text) in &mut lines {
        if let Some(value) = wording.get(line.0) {
            text.0 = value.to_string();
        }
    }
}

pub fn reflect_sound_label(
    preference: Res<SoundPreference>,
    mut labels: Query<&mut Text, With<SoundToggleLabel>>,
) {
    if !preference.is_changed() {
        return;
    }
    for mut label in &mut labels {
        label.0 = format!("Sound: {}", if preference.enabled { "On" } else { "Off" });
    }
}
