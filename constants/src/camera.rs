use bevy::math::Vec3;

/// Camera position used until the scene configuration provides `default_camera`.
pub const FALLBACK_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2.0, 3.0);

/// Point the orbit controller circles around at startup.
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Fraction of the remaining distance the camera closes each 60 Hz frame.
pub const ORBIT_DAMPING: f32 = 0.25;

pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;

/// Pitch limit in radians, just inside straight up and straight down.
pub const ORBIT_PITCH_LIMIT: f32 = 1.55;

pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
pub const ORBIT_PAN_SPEED: f32 = 0.002;
pub const ORBIT_ZOOM_SPEED: f32 = 0.1;

/// Orbit target is clamped to +/- this value on every axis while dragging.
pub const PAN_LIMIT: f32 = 3.0;

/// Pointer travel in pixels (per axis) that turns a press into a drag.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;

/// Tutorial bubble sits this far above the first hill.
pub const TUTORIAL_BUBBLE_Y_OFFSET: f32 = 1.5;

/// Frames between camera pose log lines when the camera logger is on.
pub const CAMERA_LOG_INTERVAL_FRAMES: u32 = 60;
