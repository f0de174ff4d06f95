//! JSON-backed configuration assets for the cloud station scene.
//!
//! Both files are loaded through `bevy_common_assets` and resolved into typed
//! resources once the asset server has them.

/// Page content cards for the home stages and the hills.
pub mod info_content;

/// Typed "not found" errors shared by the lookup tables.
pub mod lookup;

/// Camera and fish waypoint table parsed from the exported scene positions.
pub mod scene_positions;
