//! Shared tuning values for the cloud station scene.
//!
//! Timings, thresholds and asset paths live here so the engine and any
//! tooling agree on them.

pub mod animation;
pub mod audio;
pub mod camera;
pub mod path;
pub mod render_settings;
