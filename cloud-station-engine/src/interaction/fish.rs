use crate::engine::assets::scene_positions::WaypointTable;
use crate::engine::scene::animation::AnimatedScene;
use crate::engine::tween::Tween;
use crate::interaction::events::{FishArrived, FishExited};
use crate::interaction::waypoint::HillKey;
use bevy::prelude::*;
use constants::animation::{
    ARC_HEIGHT_FALLOFF, ARC_HEIGHT_MAX, ARC_HEIGHT_MIN, ARC_LIFT_Y, FISH_EXIT_EASE,
    FISH_EXIT_OFFSET, FISH_EXIT_SECS, FISH_TRAVEL_SECS, ORIENTATION_BLEND_START,
};
use serde::Serialize;

/// Monotonically increasing fish identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FishId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FishPhase {
    Traveling,
    Arrived,
    Exiting,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Fish {
    pub id: FishId,
    pub hill: HillKey,
    pub phase: FishPhase,
}

/// Fish model, loaded with the rest of the scene.
#[derive(Resource, Clone)]
pub struct FishAssets {
    pub scene: Handle<Scene>,
}

/// Quadratic Bézier from the spawn point to the resting pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticPath {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl QuadraticPath {
    /// Arc from `start` to `end`, bulging along +X by [`arc_height`] and
    /// lifted on Y.
    pub fn toward(start: Vec3, end: Vec3) -> Self {
        let control = (start + end) * 0.5 + Vec3::new(arc_height(start.x), ARC_LIFT_Y, 0.0);
        Self { start, control, end }
    }

    pub fn point(&self, t: f32) -> Vec3 {
        let mt = 1.0 - t;
        self.start * (mt * mt) + self.control * (2.0 * mt * t) + self.end * (t * t)
    }

    /// First derivative, not normalised.
    pub fn tangent(&self, t: f32) -> Vec3 {
        (self.control - self.start) * (2.0 * (1.0 - t)) + (self.end - self.control) * (2.0 * t)
    }
}

/// Sideways arc of the travel curve for a fish starting at `start_x`.
pub fn arc_height(start_x: f32) -> f32 {
    if start_x <= 0.0 {
        ARC_HEIGHT_MAX
    } else {
        (ARC_HEIGHT_MAX - start_x * ARC_HEIGHT_FALLOFF).max(ARC_HEIGHT_MIN)
    }
}

/// Rotation that points the model's +Z axis along `direction`.
pub fn facing(direction: Vec3) -> Quat {
    if direction.length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    Transform::IDENTITY.looking_to(-direction, Vec3::Y).rotation
}

/// Orientation at `progress` along `path`. Follows the tangent until
/// the blend start, then slerps from the end tangent to `target`, landing on it
/// exactly at 1.0.
pub fn orientation_at(path: &QuadraticPath, progress: f32, target: Option<Quat>) -> Quat {
    if progress < ORIENTATION_BLEND_START {
        return facing(path.tangent(progress));
    }

    let end_facing = facing(path.tangent(1.0));
    let target = target.unwrap_or(end_facing);
    let blend = (progress - ORIENTATION_BLEND_START) / (1.0 - ORIENTATION_BLEND_START);
    if blend >= 1.0 {
        return target;
    }
    end_facing.slerp(target, blend)
}

/// In-flight travel along the arrival curve.
#[derive(Component, Debug, Clone)]
pub struct FishTravel {
    pub path: QuadraticPath,
    pub target_rotation: Option<Quat>,
    pub tween: Tween,
}

/// In-flight straight-line exit. Rotation is frozen at its arrival value.
#[derive(Component, Debug, Clone)]
pub struct FishExit {
    pub start: Vec3,
    pub end: Vec3,
    pub rotation: Quat,
    pub tween: Tween,
}

/// Spawn a fish at `start` heading for the resting pose of `hill`.
///
/// The pose comes from `fishN`; without it the fish flies to the camera
/// waypoint of the hill and keeps its end-tangent heading.
pub fn spawn_fish(
    commands: &mut Commands,
    assets: Option<&FishAssets>,
    waypoints: &WaypointTable,
    id: FishId,
    hill: HillKey,
    start: Vec3,
) -> Option<Entity> {
    let (end, target_rotation) = match waypoints.fish_pose(hill) {
        Ok(pose) => (pose.position, Some(pose.rotation_quat())),
        Err(missing) => match waypoints.hill(hill) {
            Ok(camera_pose) => {
                debug!("{}, using the camera waypoint of {}", missing, hill);
                (camera_pose.position, None)
            }
            Err(err) => {
                warn!("Cannot spawn fish for {}: {}", hill, err);
                return None;
            }
        },
    };

    let path = QuadraticPath::toward(start, end);
    let transform = Transform::from_translation(start).with_rotation(facing(path.tangent(0.0)));

    let mut fish = commands.spawn((
        Name::new(format!("Fish {}", id.0)),
        Fish {
            id,
            hill,
            phase: FishPhase::Traveling,
        },
        FishTravel {
            path,
            target_rotation,
            tween: Tween::linear(FISH_TRAVEL_SECS),
        },
        transform,
        Visibility::default(),
    ));

    if let Some(assets) = assets {
        fish.insert((SceneRoot(assets.scene.clone()), AnimatedScene::Fish));
    }

    info!("Spawned fish {} for {} at {:?}", id.0, hill, start);
    Some(fish.id())
}

/// Swap whatever the fish is doing for the exit swim.
pub fn begin_exit(commands: &mut Commands, entity: Entity, fish: &mut Fish, transform: &Transform) {
    fish.phase = FishPhase::Exiting;
    commands
        .entity(entity)
        .remove::<FishTravel>()
        .insert(FishExit {
            start: transform.translation,
            end: transform.translation + FISH_EXIT_OFFSET,
            rotation: transform.rotation,
            tween: Tween::new(FISH_EXIT_SECS, FISH_EXIT_EASE),
        });
}

pub fn advance_fish_travel(
    time: Res<Time>,
    mut commands: Commands,
    mut fish: Query<(Entity, &mut Fish, &mut FishTravel, &mut Transform)>,
    mut arrived: EventWriter<FishArrived>,
) {
    for (entity, mut fish, mut travel, mut transform) in &mut fish {
        travel.tween.tick(time.delta());
        let progress = travel.tween.progress();

        transform.translation = travel.path.point(progress);
        transform.rotation = orientation_at(&travel.path, progress, travel.target_rotation);

        if travel.tween.finished() {
            transform.translation = travel.path.end;
            fish.phase = FishPhase::Arrived;
            commands.entity(entity).remove::<FishTravel>();
            arrived.write(FishArrived {
                fish: fish.id,
                hill: fish.hill,
            });
        }
    }
}

pub fn advance_fish_exit(
    time: Res<Time>,
    mut commands: Commands,
    mut fish: Query<(Entity, &Fish, &mut FishExit, &mut Transform)>,
    mut exited: EventWriter<FishExited>,
) {
    for (entity, fish, mut exit, mut transform) in &mut fish {
        exit.tween.tick(time.delta());
        transform.translation = exit.start.lerp(exit.end, exit.tween.eased());
        transform.rotation = exit.rotation;

        if exit.tween.finished() {
            commands.entity(entity).despawn();
            exited.write(FishExited { fish: Some(fish.id) });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn arc_height_falls_off_to_floor() {
        assert_eq!(arc_height(-5.0), 10.0);
        assert_eq!(arc_height(0.0), 10.0);
        assert_abs_diff_eq!(arc_height(2.5), 6.0, epsilon = 1e-6);
        assert!(arc_height(1.0) > arc_height(3.0));
        for x in [5.0, 5.5, 8.0, 100.0] {
            assert_eq!(arc_height(x), 2.0);
        }
    }

    #[test]
    fn path_hits_both_ends_and_bulges() {
        let path = QuadraticPath::toward(Vec3::new(0.0, 2.0, 1.5), Vec3::new(-2.0, 0.5, -1.0));
        assert_eq!(path.control, Vec3::new(-1.0 + 10.0, 1.25 + 2.0, 0.25));
        assert!(path.point(0.0).abs_diff_eq(path.start, 1e-6));
        assert!(path.point(1.0).abs_diff_eq(path.end, 1e-6));
        assert!(path.point(0.5).x > path.start.x.max(path.end.x));
    }

    #[test]
    fn facing_points_positive_z_along_direction() {
        for direction in [Vec3::X, Vec3::NEG_Z, Vec3::new(1.0, 0.5, -2.0)] {
            let forward = facing(direction) * Vec3::Z;
            assert!(forward.abs_diff_eq(direction.normalize(), 1e-5));
        }
    }

    #[test]
    fn orientation_lands_on_configured_rotation() {
        let path = QuadraticPath::toward(Vec3::new(3.0, 2.0, 1.5), Vec3::new(-1.0, 0.6, 0.2));
        let target = Quat::from_euler(EulerRot::XYZ, 0.1, 1.2, -0.3);

        assert_eq!(orientation_at(&path, 1.0, Some(target)), target);

        let early = orientation_at(&path, 0.3, Some(target));
        assert!(early.abs_diff_eq(facing(path.tangent(0.3)), 1e-6));

        let blend_start = orientation_at(&path, ORIENTATION_BLEND_START, Some(target));
        assert!(blend_start.abs_diff_eq(facing(path.tangent(1.0)), 1e-5));
    }

    #[test]
    fn orientation_without_target_keeps_end_tangent() {
        let path = QuadraticPath::toward(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        let end_facing = facing(path.tangent(1.0));
        assert!(orientation_at(&path, 0.9, None).abs_diff_eq(end_facing, 1e-6));
        assert!(orientation_at(&path, 1.0, None).abs_diff_eq(end_facing, 1e-6));
    }
}
