//! Overlays drawn over the scene: loading screen, hill card with next/exit
//! controls, tutorial bubble, instruction card, sound toggle and home.
//!
//! Overlay state is shared by every build. Native builds draw it with Bevy UI;
//! wasm builds leave drawing to the host page, which follows the same state
//! through the RPC notifications.

/// UI button interactions for the overlay controls (native only).
pub mod interactions;

/// Overlay spawning and reflection of interaction state (native only).
pub mod panels;

/// Instruction card timer, touch detection and home navigation.
pub mod state;

use crate::engine::core::app_state::AppState;
use bevy::prelude::*;
use state::{
    DismissInstructionsRequested, NavigateHomeRequested, OverlayState, detect_touch_device,
    handle_dismiss_instructions, handle_navigate_home, tick_instruction_card,
};

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayState>()
            .add_event::<DismissInstructionsRequested>()
            .add_event::<NavigateHomeRequested>()
            .add_systems(
                Update,
                (
                    detect_touch_device,
                    handle_dismiss_instructions,
                    handle_navigate_home,
                    tick_instruction_card.run_if(in_state(AppState::Running)),
                ),
            );

        // Bevy UI overlays only for native builds.
        #[cfg(not(target_arch = "wasm32"))]
        {
            use interactions::{
                dismiss_instructions_button_interaction, exit_zoom_button_interaction,
                home_button_interaction, next_button_interaction, sound_toggle_button_interaction,
            };
            use panels::{
                hide_loading_overlay, reflect_hill_card, reflect_instruction_card,
                reflect_sequence_buttons, reflect_sound_label, reflect_tutorial_bubble,
                spawn_overlays,
            };

            app.add_systems(Startup, spawn_overlays)
                .add_systems(OnEnter(AppState::Running), hide_loading_overlay)
                .add_systems(
                    Update,
                    (
                        next_button_interaction,
                        exit_zoom_button_interaction,
                        dismiss_instructions_button_interaction,
                        sound_toggle_button_interaction,
                        home_button_interaction,
                        reflect_hill_card,
                        reflect_sequence_buttons,
                        reflect_tutorial_bubble,
                        reflect_instruction_card,
                        reflect_sound_label,
                    )
                        .run_if(in_state(AppState::Running)),
                );
        }
    }
}
