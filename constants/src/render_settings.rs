use bevy::color::Color;

pub const DIRECTIONAL_LIGHT_ILLUMINANCE: f32 = 4_000.0;
pub const AMBIENT_LIGHT_BRIGHTNESS: f32 = 500.0;

/// Uniform scale applied to the skybox nodes of the scene.
pub const SKYBOX_SCALE: f32 = 6.0;

pub const HILL_OUTLINE_COLOUR: Color = Color::WHITE;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
