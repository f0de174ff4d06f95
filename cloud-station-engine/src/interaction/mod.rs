//! Hill interaction and the fish/camera choreography around it.
//!
//! Pointer input is turned into [`events::HillSelected`] by the picking
//! systems; the sequencer reacts to that and to the lifecycle events of the
//! fish and the camera transition, keeping [`state::InteractionState`] in step.

/// Drag-versus-click discrimination for pointer gestures.
pub mod drag;

/// Typed events flowing between input, fish and camera systems.
pub mod events;

/// Fish actor: Bézier travel towards its pose and straight-line exit.
pub mod fish;

/// Exclusive hill highlight bookkeeping.
pub mod hover;

/// Screen-space hill picking, hover and click handling.
pub mod picking;

/// Reactions to selection, arrival, exit and camera completion.
pub mod sequencer;

/// Shared interaction flags and sequence phase.
pub mod state;

/// Hill keys and the fixed ring they advance through.
pub mod waypoint;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::camera::transition::advance_camera_transition;
use crate::engine::core::app_state::AppState;
use bevy::prelude::*;
use drag::DragTracker;
use events::{
    CameraTransitionFinished, ExitZoomRequested, FishArrived, FishExited, HillSelected,
    NextHillRequested,
};
use fish::{advance_fish_exit, advance_fish_travel};
use hover::HoverState;
use picking::{handle_hill_click, track_pointer_drag, update_hill_hover};
use sequencer::{
    handle_camera_finished, handle_exit_zoom_request, handle_fish_exited, handle_hill_selection,
    handle_next_request, start_camera_on_arrival, sync_orbit_enabled,
};
use state::InteractionState;

/// Systems that consume interaction events. Input producers run before it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequencerSet;

/// Event plumbing and the sequencer. Runs headless, so it only needs time.
pub struct SequencerPlugin;

impl Plugin for SequencerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionState>()
            .init_resource::<OrbitCamera>()
            .add_event::<HillSelected>()
            .add_event::<NextHillRequested>()
            .add_event::<ExitZoomRequested>()
            .add_event::<FishArrived>()
            .add_event::<FishExited>()
            .add_event::<CameraTransitionFinished>()
            .add_systems(
                Update,
                (
                    handle_hill_selection,
                    handle_next_request,
                    handle_exit_zoom_request,
                    advance_fish_travel,
                    advance_fish_exit,
                    start_camera_on_arrival,
                    advance_camera_transition,
                    handle_camera_finished,
                    handle_fish_exited,
                    sync_orbit_enabled,
                )
                    .chain()
                    .in_set(SequencerSet),
            );
    }
}

/// Pointer driven hover and click on hills.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SequencerPlugin)
            .init_resource::<DragTracker>()
            .init_resource::<HoverState>()
            .add_systems(
                Update,
                (track_pointer_drag, update_hill_hover, handle_hill_click)
                    .chain()
                    .before(SequencerSet)
                    .run_if(in_state(AppState::Running)),
            );
    }
}
