//! Runtime helper systems: screen-space tutorial hint and camera pose logging.

/// Camera pose logging for authoring the waypoint file.
///
/// Toggled with F2 on native builds; prints every 60 frames while on.
pub mod camera_logger;

/// Screen-space anchor and visibility of the "Click on a hill" hint.
pub mod tutorial_bubble;
