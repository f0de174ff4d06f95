use crate::audio::preference::SoundToggleRequested;
use crate::interaction::events::{ExitZoomRequested, NextHillRequested};
use crate::ui::panels::{
    DismissInstructionsButton, ExitZoomButton, HomeButton, NextButton, SoundToggleButton,
};
use crate::ui::state::{DismissInstructionsRequested, NavigateHomeRequested};
use bevy::prelude::*;

const IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
const HOVERED: Color = Color::srgb(0.26, 0.28, 0.32);
const PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);

/// Shared hover/press colouring. Returns true on press.
fn pressed(interaction: &Interaction, bg: &mut BackgroundColor) -> bool {
    match *interaction {
        Interaction::Pressed => { *bg = BackgroundColor(PRESSED); true }
        Interaction::Hovered => { *bg = BackgroundColor(HOVERED); false }
        Interaction::None    => { *bg = BackgroundColor(IDLE); false }
    }
}

pub fn next_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>, With<NextButton>)>,
    mut requests: EventWriter<NextHillRequested>,
) {
    for (interaction, mut bg) in &mut q {
        if pressed(interaction, &mut bg) { requests.write(NextHillRequested); }
    }
}

pub fn exit_zoom_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>, With<ExitZoomButton>)>,
    mut requests: EventWriter<ExitZoomRequested>,
) {
    for (interaction, mut bg) in &mut q {
        if pressed(interaction, &mut bg) { requests.write(ExitZoomRequested); }
    }
}

pub fn dismiss_instructions_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>, With<DismissInstructionsButton>)>,
    mut requests: EventWriter<DismissInstructionsRequested>,
) {
    for (interaction, mut bg) in &mut q {
        if pressed(interaction, &mut bg) { requests.write(DismissInstructionsRequested); }
    }
}

pub fn sound_toggle_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>, With<SoundToggleButton>)>,
    mut requests: EventWriter<SoundToggleRequested>,
) {
    for (interaction, mut bg) in &mut q {
        if pressed(interaction, &mut bg) { requests.write(SoundToggleRequested); }
    }
}

pub fn home_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>, With<HomeButton>)>,
    mut requests: EventWriter<NavigateHomeRequested>,
) {
    for (interaction, mut bg) in &mut q {
        if pressed(interaction, &mut bg) { requests.write(NavigateHomeRequested); }
    }
}
