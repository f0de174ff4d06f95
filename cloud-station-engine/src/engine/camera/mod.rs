//! Scene camera: free orbit control and automated waypoint transitions.
//!
//! The orbit controller and the transition controller never drive the camera
//! in the same frame. `OrbitCamera::enabled` is cleared for as long as
//! `InteractionState::is_animating_camera` is set, and the transition
//! component only exists while a move is in flight.

use bevy::prelude::*;

/// Orbit controller resource plus its input and apply systems.
pub mod orbit_camera;

/// Eased position/rotation moves towards a waypoint, one per camera.
pub mod transition;

/// Marks the single camera that renders the cloud station.
#[derive(Component, Debug, Default)]
pub struct SceneCamera;
