use crate::audio::music::CurrentRoute;
use crate::interaction::events::ExitZoomRequested;
use crate::interaction::state::InteractionState;
use bevy::input::touch::Touches;
use bevy::prelude::*;
use constants::animation::INSTRUCTION_CARD_SECS;
use constants::path::HOME_ROUTE;

// Resources
#[derive(Resource, Debug)]
pub struct OverlayState {
    pub instructions_visible: bool,
    pub instructions_timer: Timer,
    /// Switches the instruction card to its touch wording.
    pub touch_device: bool,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            instructions_visible: true,
            instructions_timer: Timer::from_seconds(INSTRUCTION_CARD_SECS, TimerMode::Once),
            touch_device: false,
        }
    }
}

impl OverlayState {
    pub fn instruction_lines(&self) -> &'static [&'static str] {
        if self.touch_device {
            &[
                "One finger swipe to rotate",
                "Two fingers swipe to pan",
                "Pinch to zoom",
            ]
        } else {
            &[
                "Left click + drag to rotate",
                "Right click + drag for pan",
                "Scroll to zoom in/out",
            ]
        }
    }
}

// Events
#[derive(Event, Debug, Clone, Copy)]
pub struct DismissInstructionsRequested;

#[derive(Event, Debug, Clone, Copy)]
pub struct NavigateHomeRequested;

/// Instruction card closes on its own once its timer runs out.
pub fn tick_instruction_card(time: Res<Time>, mut overlay: ResMut<OverlayState>) {
    if !overlay.instructions_visible {
        return;
    }
    if overlay.instructions_timer.tick(time.delta()).just_finished() {
        overlay.instructions_visible = false;
    }
}

pub fn handle_dismiss_instructions(
    mut dismissals: EventReader<DismissInstructionsRequested>,
    mut overlay: ResMut<OverlayState>,
) {
    if dismissals.read().count() > 0 && overlay.instructions_visible {
        overlay.instructions_visible = false;
    }
}

pub fn detect_touch_device(touches: Res<Touches>, mut overlay: ResMut<OverlayState>) {
    if !overlay.touch_device && touches.any_just_pressed() {
        overlay.touch_device = true;
    }
}

/// Home leaves the station: the route switches (and with it the music) and a
/// zoomed camera is sent back to its default pose.
pub fn handle_navigate_home(
    mut requests: EventReader<NavigateHomeRequested>,
    state: Res<InteractionState>,
    mut route: ResMut<CurrentRoute>,
    mut exits: EventWriter<ExitZoomRequested>,
) {
    if requests.read().count() == 0 {
        return;
    }
    info!("Navigating to {}", HOME_ROUTE);
    route.set_if_neq(CurrentRoute(HOME_ROUTE));
    if state.is_zoom_mode && !state.is_exiting {
        exits.write(ExitZoomRequested);
    }
}
