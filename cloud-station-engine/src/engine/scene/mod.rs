//! Cloud station scene: glTF spawning, node tagging, looping animation and
//! hover outlines.

/// Scene-wide animation graphs and looping playback.
pub mod animation;

/// Spawns the station scene and tags its hill and skybox nodes.
pub mod cloud_station;

/// Bounding-box outline drawn around the highlighted hill.
pub mod outline;
