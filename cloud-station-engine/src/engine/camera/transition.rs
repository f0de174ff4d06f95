use crate::engine::tween::Tween;
use crate::interaction::events::{CameraTarget, CameraTransitionFinished};
use bevy::prelude::*;
use constants::animation::{CAMERA_TRANSITION_EASE, CAMERA_TRANSITION_SECS};

/// Automated camera move. One per camera: inserting a new one replaces the
/// in-flight move, and the replaced move never reports completion.
#[derive(Component, Debug, Clone)]
pub struct CameraTransition {
    pub from: Transform,
    pub to_position: Vec3,
    pub to_rotation: Quat,
    pub target: CameraTarget,
    tween: Tween,
}

impl CameraTransition {
    pub fn new(from: &Transform, to_position: Vec3, to_rotation: Quat, target: CameraTarget) -> Self {
        Self {
            from: *from,
            to_position,
            to_rotation,
            target,
            tween: Tween::new(CAMERA_TRANSITION_SECS, CAMERA_TRANSITION_EASE),
        }
    }

    pub fn progress(&self) -> f32 {
        self.tween.progress()
    }

    fn sample(&self) -> (Vec3, Quat) {
        let t = self.tween.eased();
        (
            self.from.translation.lerp(self.to_position, t),
            self.from.rotation.slerp(self.to_rotation, t),
        )
    }
}

/// Start a transition on `camera`, cancelling whatever move was in flight.
pub fn start_camera_transition(
    commands: &mut Commands,
    camera: Entity,
    from: &Transform,
    in_flight: Option<&CameraTransition>,
    to_position: Vec3,
    to_rotation: Quat,
    target: CameraTarget,
) {
    if let Some(previous) = in_flight {
        info!(
            "Cancelling camera transition to {:?} at {:.0}%",
            previous.target,
            previous.progress() * 100.0
        );
    }
    info!("Camera transition to {:?} started", target);
    commands
        .entity(camera)
        .insert(CameraTransition::new(from, to_position, to_rotation, target));
}

pub fn advance_camera_transition(
    time: Res<Time>,
    mut commands: Commands,
    mut cameras: Query<(Entity, &mut Transform, &mut CameraTransition)>,
    mut finished: EventWriter<CameraTransitionFinished>,
) {
    for (entity, mut transform, mut transition) in &mut cameras {
        transition.tween.tick(time.delta());
        let (translation, rotation) = transition.sample();
        transform.translation = translation;
        transform.rotation = rotation;

        if transition.tween.finished() {
            transform.translation = transition.to_position;
            transform.rotation = transition.to_rotation;
            commands.entity(entity).remove::<CameraTransition>();
            finished.write(CameraTransitionFinished {
                target: transition.target,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct Finished(Vec<CameraTarget>);

    fn collect_finished(mut events: EventReader<CameraTransitionFinished>, mut seen: ResMut<Finished>) {
        seen.0.extend(events.read().map(|ev| ev.target));
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_resource::<Finished>()
            .add_event::<CameraTransitionFinished>()
            .add_systems(Update, (advance_camera_transition, collect_finished).chain());
        app
    }

    #[test]
    fn transition_lands_exactly_and_reports_once() {
        let mut app = app();
        let from = Transform::from_xyz(0.0, 2.0, 3.0);
        let to_rotation = Quat::from_rotation_y(0.8);
        let camera = app
            .world_mut()
            .spawn((
                from,
                CameraTransition::new(&from, Vec3::new(1.0, 0.5, -2.0), to_rotation, CameraTarget::Home),
            ))
            .id();

        for _ in 0..25 {
            app.update();
        }

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert_eq!(transform.translation, Vec3::new(1.0, 0.5, -2.0));
        assert_eq!(transform.rotation, to_rotation);
        assert!(app.world().get::<CameraTransition>(camera).is_none());
        assert_eq!(app.world().resource::<Finished>().0, vec![CameraTarget::Home]);
    }

    #[test]
    fn replaced_transition_never_reports() {
        use crate::interaction::waypoint::HillKey;

        let mut app = app();
        let from = Transform::from_xyz(0.0, 2.0, 3.0);
        let camera = app
            .world_mut()
            .spawn((
                from,
                CameraTransition::new(&from, Vec3::X, Quat::IDENTITY, CameraTarget::Hill(HillKey::Hill1)),
            ))
            .id();

        for _ in 0..5 {
            app.update();
        }
        app.world_mut()
            .entity_mut(camera)
            .insert(CameraTransition::new(&from, Vec3::Y, Quat::IDENTITY, CameraTarget::Home));
        for _ in 0..25 {
            app.update();
        }

        assert_eq!(app.world().resource::<Finished>().0, vec![CameraTarget::Home]);
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert_eq!(transform.translation, Vec3::Y);
    }
}
