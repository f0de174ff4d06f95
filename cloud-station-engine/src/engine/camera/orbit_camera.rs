use crate::engine::camera::SceneCamera;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::input::touch::Touches;
use bevy::prelude::*;
use constants::camera::{
    FALLBACK_CAMERA_POSITION, ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
    ORBIT_PAN_SPEED, ORBIT_PITCH_LIMIT, ORBIT_ROTATE_SPEED, ORBIT_TARGET, ORBIT_ZOOM_SPEED,
    PAN_LIMIT,
};

/// Orbit controller state. The camera sits `distance` away from `target` along
/// the yaw/pitch direction; user input moves the `goal_*` values and the
/// current values ease towards them every frame.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    goal_target: Vec3,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
    /// Off while an automated transition owns the camera.
    pub enabled: bool,
    pub is_dragging: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(FALLBACK_CAMERA_POSITION, ORBIT_TARGET)
    }
}

impl OrbitCamera {
    pub fn looking_from(position: Vec3, target: Vec3) -> Self {
        let mut orbit = Self {
            target,
            yaw: 0.0,
            pitch: 0.0,
            distance: ORBIT_MIN_DISTANCE,
            goal_target: target,
            goal_yaw: 0.0,
            goal_pitch: 0.0,
            goal_distance: ORBIT_MIN_DISTANCE,
            enabled: true,
            is_dragging: false,
        };
        orbit.sync_to(position);
        orbit
    }

    /// Re-derive yaw, pitch and distance from a camera position so control
    /// resumes from wherever an automated move left the camera.
    pub fn sync_to(&mut self, position: Vec3) {
        let offset = position - self.target;
        let distance = offset.length();
        if distance > f32::EPSILON {
            let direction = offset / distance;
            self.pitch = (-direction.y).clamp(-1.0, 1.0).asin();
            self.yaw = direction.x.atan2(direction.z);
        }
        self.distance = distance.clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        self.goal_target = self.target;
        self.goal_yaw = self.yaw;
        self.goal_pitch = self.pitch;
        self.goal_distance = self.distance;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn transform(&self) -> Transform {
        let rotation = self.rotation();
        Transform {
            translation: self.target + rotation * Vec3::Z * self.distance,
            rotation,
            ..default()
        }
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.goal_yaw -= delta.x * ORBIT_ROTATE_SPEED;
        self.goal_pitch =
            (self.goal_pitch - delta.y * ORBIT_ROTATE_SPEED).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    pub fn pan(&mut self, delta: Vec2) {
        let rotation = self.rotation();
        let scale = ORBIT_PAN_SPEED * self.distance;
        self.goal_target += (rotation * Vec3::NEG_X) * delta.x * scale + (rotation * Vec3::Y) * delta.y * scale;
    }

    /// Positive `amount` moves closer.
    pub fn zoom(&mut self, amount: f32) {
        self.goal_distance =
            (self.goal_distance * (1.0 - amount * ORBIT_ZOOM_SPEED)).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Ease towards the goal. The damping factor is defined per 60 Hz frame.
    pub fn step(&mut self, delta_secs: f32) {
        if self.is_dragging {
            self.goal_target = self.goal_target.clamp(Vec3::splat(-PAN_LIMIT), Vec3::splat(PAN_LIMIT));
        }

        let blend = 1.0 - (1.0 - ORBIT_DAMPING).powf(delta_secs * 60.0);
        self.target = self.target.lerp(self.goal_target, blend);
        self.yaw += (self.goal_yaw - self.yaw) * blend;
        self.pitch += (self.goal_pitch - self.pitch) * blend;
        self.distance += (self.goal_distance - self.distance) * blend;
    }
}

/// Mouse: left drag rotates, right drag pans, wheel zooms.
/// Touch: one finger rotates, two fingers pan and pinch zooms.
pub fn orbit_camera_input(
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    touches: Res<Touches>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();

    if !orbit.enabled {
        orbit.is_dragging = false;
        return;
    }

    let held: Vec<_> = touches.iter().collect();
    let rotating = mouse_button.pressed(MouseButton::Left) || held.len() == 1;
    let panning = mouse_button.pressed(MouseButton::Right) || held.len() == 2;
    orbit.is_dragging = rotating || panning;

    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.rotate(mouse_delta);
    }
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        orbit.pan(mouse_delta);
    }
    if scroll.abs() > f32::EPSILON {
        orbit.zoom(scroll);
    }

    match held.as_slice() {
        [finger] => orbit.rotate(finger.delta()),
        [first, second] => {
            orbit.pan((first.delta() + second.delta()) * 0.5);

            let now = first.position().distance(second.position());
            let before = (first.position() - first.delta()).distance(second.position() - second.delta());
            if before > f32::EPSILON {
                orbit.zoom((now - before) / before * 10.0);
            }
        }
        _ => {}
    }
}

pub fn apply_orbit_camera(
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<SceneCamera>>,
) {
    if !orbit.enabled {
        return;
    }
    let Ok(mut camera_transform) = cameras.single_mut() else {
        return;
    };

    orbit.step(time.delta_secs());
    let transform = orbit.transform();
    camera_transform.translation = transform.translation;
    camera_transform.rotation = transform.rotation;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_orbit_reproduces_fallback_position() {
        let orbit = OrbitCamera::default();
        let transform = orbit.transform();
        assert!(transform.translation.abs_diff_eq(FALLBACK_CAMERA_POSITION, 1e-5));

        let towards_target = (ORBIT_TARGET - transform.translation).normalize();
        assert!(transform.forward().as_vec3().abs_diff_eq(towards_target, 1e-5));
    }

    #[test]
    fn sync_to_resumes_without_a_jump() {
        let mut orbit = OrbitCamera::default();
        let resumed_at = Vec3::new(-2.0, 3.0, 4.0);
        orbit.sync_to(resumed_at);
        orbit.step(1.0 / 60.0);
        assert!(orbit.transform().translation.abs_diff_eq(resumed_at, 1e-4));
    }

    #[test]
    fn zoom_respects_max_distance() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..200 {
            orbit.zoom(-5.0);
            orbit.step(1.0 / 60.0);
        }
        assert_abs_diff_eq!(orbit.distance, ORBIT_MAX_DISTANCE, epsilon = 1e-3);
    }

    #[test]
    fn dragging_clamps_target_to_pan_limit() {
        let mut orbit = OrbitCamera::default();
        orbit.is_dragging = true;
        for _ in 0..500 {
            orbit.pan(Vec2::new(-400.0, 0.0));
            orbit.step(1.0 / 60.0);
        }
        assert!(orbit.target.abs().max_element() <= PAN_LIMIT + 1e-4);
    }
}
