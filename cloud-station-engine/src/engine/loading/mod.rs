//! Asset loading for the cloud station scene.
//!
//! Starts the glTF and JSON loads, resolves the JSON files into typed
//! resources and tracks progress for the `Loading → Running` transition.

/// Loads the scene, fish model and configuration files.
///
/// Resolves the waypoint table and content cards once parsed, or marks them
/// resolved on failure so loading can still finish.
pub mod config_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
