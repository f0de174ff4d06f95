use bevy::math::Vec3;
use bevy::math::curve::easing::EaseFunction;

/// Seconds a camera transition takes, to a hill waypoint or back home.
pub const CAMERA_TRANSITION_SECS: f32 = 1.5;
pub const CAMERA_TRANSITION_EASE: EaseFunction = EaseFunction::CubicInOut;

/// Seconds the fish takes to swim from its spawn point to the hill.
pub const FISH_TRAVEL_SECS: f32 = 2.0;

/// Seconds the fish takes to leave the hill.
pub const FISH_EXIT_SECS: f32 = 1.0;
pub const FISH_EXIT_EASE: EaseFunction = EaseFunction::CubicIn;

/// Straight-line displacement applied to a fish leaving its hill.
pub const FISH_EXIT_OFFSET: Vec3 = Vec3::new(-15.0, 0.0, 0.0);

/// Distance behind the camera (world -Z) where a clicked-hill fish appears.
pub const FISH_SPAWN_OFFSET_Z: f32 = 1.5;

/// Travel progress at which the fish stops following the path tangent
/// and starts turning towards its resting orientation.
pub const ORIENTATION_BLEND_START: f32 = 0.75;

/// Arc height used for spawn points at or left of the scene centre.
pub const ARC_HEIGHT_MAX: f32 = 10.0;

/// Arc height floor for spawn points far right of centre.
pub const ARC_HEIGHT_MIN: f32 = 2.0;

/// Arc height lost per unit of positive spawn X.
pub const ARC_HEIGHT_FALLOFF: f32 = 1.6;

/// Vertical lift of the curve control point above the path midpoint.
pub const ARC_LIFT_Y: f32 = 2.0;

/// Delay between the scene finishing loading and the loading overlay hiding.
pub const LOADING_OVERLAY_DELAY_SECS: f32 = 0.3;

/// The navigation instruction card dismisses itself after this long.
pub const INSTRUCTION_CARD_SECS: f32 = 10.0;
