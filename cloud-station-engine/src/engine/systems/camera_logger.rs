use crate::engine::camera::SceneCamera;
use crate::engine::camera::orbit_camera::OrbitCamera;
use bevy::prelude::*;
use constants::camera::CAMERA_LOG_INTERVAL_FRAMES;

/// Periodic camera pose dump used when authoring waypoints.
#[derive(Resource, Default, Debug)]
pub struct CameraLogger {
    pub enabled: bool,
}

/// F2 toggles the camera logger.
pub fn toggle_camera_logger(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut logger: ResMut<CameraLogger>,
) {
    if keyboard.just_pressed(KeyCode::F2) {
        logger.enabled = !logger.enabled;
        println!(
            "Camera logger: {}",
            if logger.enabled { "on" } else { "off" }
        );
    }
}

/// Log lines use the same `pos`/`rotation` (XYZ radians) layout as the
/// waypoint file so they can be pasted straight in.
pub fn log_camera_pose(
    logger: Res<CameraLogger>,
    mut frames: Local<u32>,
    orbit: Res<OrbitCamera>,
    cameras: Query<&Transform, With<SceneCamera>>,
) {
    if !logger.enabled {
        return;
    }
    *frames = frames.wrapping_add(1);
    if *frames % CAMERA_LOG_INTERVAL_FRAMES != 0 {
        return;
    }
    let Ok(transform) = cameras.single() else {
        return;
    };

    let p = transform.translation;
    let (rx, ry, rz) = transform.rotation.to_euler(EulerRot::XYZ);
    info!(
        "camera pos: {{\"x\":\"{:.3}\",\"y\":\"{:.3}\",\"z\":\"{:.3}\"}} rotation: {{\"x\":\"{:.3}\",\"y\":\"{:.3}\",\"z\":\"{:.3}\"}} target: {:?}",
        p.x, p.y, p.z, rx, ry, rz, orbit.target
    );
}
