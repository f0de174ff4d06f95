use crate::engine::assets::scene_positions::WaypointTable;
use crate::engine::camera::SceneCamera;
use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::camera::transition::{CameraTransition, start_camera_transition};
use crate::interaction::events::{
    CameraTarget, CameraTransitionFinished, ExitZoomRequested, FishArrived, FishExited,
    HillSelected, NextHillRequested,
};
use crate::interaction::fish::{Fish, FishAssets, FishPhase, begin_exit, spawn_fish};
use crate::interaction::state::InteractionState;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use constants::animation::FISH_SPAWN_OFFSET_Z;
use constants::camera::FALLBACK_CAMERA_POSITION;

/// The scene camera together with any transition it is running.
#[derive(SystemParam)]
pub struct CameraRig<'w, 's> {
    cameras: Query<
        'w,
        's,
        (Entity, &'static Transform, Option<&'static CameraTransition>),
        With<SceneCamera>,
    >,
}

impl CameraRig<'_, '_> {
    pub fn position(&self) -> Vec3 {
        self.cameras
            .single()
            .map(|(_, transform, _)| transform.translation)
            .unwrap_or(FALLBACK_CAMERA_POSITION)
    }

    /// Replace any in-flight move with one towards `position`/`rotation`.
    pub fn transition_to(&self, commands: &mut Commands, position: Vec3, rotation: Quat, target: CameraTarget) -> bool {
        let Ok((entity, transform, in_flight)) = self.cameras.single() else {
            warn!("No scene camera to move to {:?}", target);
            return false;
        };
        start_camera_transition(commands, entity, transform, in_flight, position, rotation, target);
        true
    }
}

/// Click or host-page selection of a hill: spawn a fish towards it.
pub fn handle_hill_selection(
    mut commands: Commands,
    mut selections: EventReader<HillSelected>,
    mut state: ResMut<InteractionState>,
    waypoints: Option<Res<WaypointTable>>,
    fish_assets: Option<Res<FishAssets>>,
    rig: CameraRig,
) {
    for selection in selections.read() {
        let Some(waypoints) = waypoints.as_deref() else {
            warn!("Ignoring selection of {}: scene positions not loaded", selection.hill);
            continue;
        };
        if let Err(err) = waypoints.hill(selection.hill) {
            warn!("Ignoring selection of {}: {}", selection.hill, err);
            continue;
        }
        if state.is_exiting {
            debug!("Ignoring selection of {} while a fish is leaving", selection.hill);
            continue;
        }
        if state.is_zoom_mode && state.current_hill == Some(selection.hill) {
            debug!("{} is already in view", selection.hill);
            continue;
        }

        info!("Hill {} selected ({:?})", selection.hill, selection.source);
        state.is_animating_camera = true;
        state.has_clicked_hill = true;
        state.show_next = false;
        state.is_zoom_mode = false;
        state.current_hill = Some(selection.hill);

        let id = state.allocate_fish();
        let start = rig.position() - Vec3::Z * FISH_SPAWN_OFFSET_Z;
        spawn_fish(&mut commands, fish_assets.as_deref(), waypoints, id, selection.hill, start);
    }
}

/// Send the live fish away. Reports an immediate exit if there is none.
fn exit_live_fish(
    commands: &mut Commands,
    state: &InteractionState,
    fish: &mut Query<(Entity, &mut Fish, &Transform)>,
    exited: &mut EventWriter<FishExited>,
) {
    let live = fish
        .iter_mut()
        .find(|(_, fish, _)| Some(fish.id) == state.last_fish && fish.phase != FishPhase::Exiting);

    match live {
        Some((entity, mut fish, transform)) => begin_exit(commands, entity, &mut fish, transform),
        None => {
            debug!("No live fish to send away");
            exited.write(FishExited { fish: None });
        }
    }
}

pub fn handle_next_request(
    mut commands: Commands,
    mut requests: EventReader<NextHillRequested>,
    mut state: ResMut<InteractionState>,
    mut fish: Query<(Entity, &mut Fish, &Transform)>,
    mut exited: EventWriter<FishExited>,
) {
    for _ in requests.read() {
        if !state.show_next {
            debug!("Next requested while the next control is hidden");
            continue;
        }
        state.is_exiting = true;
        state.is_zoom_mode = false;
        state.show_next = false;
        exit_live_fish(&mut commands, &state, &mut fish, &mut exited);
    }
}

pub fn handle_exit_zoom_request(
    mut commands: Commands,
    mut requests: EventReader<ExitZoomRequested>,
    mut state: ResMut<InteractionState>,
    mut fish: Query<(Entity, &mut Fish, &Transform)>,
    mut exited: EventWriter<FishExited>,
) {
    for _ in requests.read() {
        if !state.is_zoom_mode || state.is_exiting {
            debug!("Exit zoom requested outside zoom mode");
            continue;
        }
        state.exiting_to_home = true;
        state.is_exiting = true;
        state.show_next = false;
        exit_live_fish(&mut commands, &state, &mut fish, &mut exited);
    }
}

/// The live fish reached its hill: fly the camera to the hill waypoint.
pub fn start_camera_on_arrival(
    mut commands: Commands,
    mut arrivals: EventReader<FishArrived>,
    mut state: ResMut<InteractionState>,
    waypoints: Option<Res<WaypointTable>>,
    rig: CameraRig,
) {
    for arrival in arrivals.read() {
        if Some(arrival.fish) != state.last_fish {
            debug!("Superseded fish {} arrived", arrival.fish.0);
            continue;
        }
        let Some(waypoint) = waypoints.as_deref().and_then(|w| w.hill(arrival.hill).ok()) else {
            warn!("No camera waypoint for {}", arrival.hill);
            continue;
        };

        state.is_animating_camera = true;
        rig.transition_to(
            &mut commands,
            waypoint.position,
            waypoint.rotation_quat(),
            CameraTarget::Hill(arrival.hill),
        );
    }
}

pub fn handle_camera_finished(
    mut commands: Commands,
    mut finished: EventReader<CameraTransitionFinished>,
    mut state: ResMut<InteractionState>,
    mut orbit: ResMut<OrbitCamera>,
    fish: Query<(Entity, &Fish)>,
    rig: CameraRig,
) {
    for event in finished.read() {
        match event.target {
            CameraTarget::Hill(hill) => {
                if state.current_hill != Some(hill) {
                    debug!("Camera reached {} after the tour moved on", hill);
                    continue;
                }
                state.show_next = true;
                state.is_zoom_mode = true;

                for (entity, fish) in &fish {
                    if Some(fish.id) != state.last_fish {
                        commands.entity(entity).despawn();
                    }
                }
                info!("Zoomed on {}", hill);
            }
            CameraTarget::Home => {
                if state.current_hill.is_some() {
                    debug!("Camera reached home after a new tour started");
                    continue;
                }
                state.is_animating_camera = false;
                orbit.sync_to(rig.position());
                info!("Camera back home, orbit control restored");
            }
        }
    }
}

/// Finish an exit: either continue the ring or return to the home view.
pub fn handle_fish_exited(
    mut commands: Commands,
    mut exits: EventReader<FishExited>,
    mut state: ResMut<InteractionState>,
    mut orbit: ResMut<OrbitCamera>,
    waypoints: Option<Res<WaypointTable>>,
    fish_assets: Option<Res<FishAssets>>,
    all_fish: Query<Entity, With<Fish>>,
    rig: CameraRig,
) {
    for exit in exits.read() {
        if !state.is_exiting {
            continue;
        }
        if exit.fish.is_some() && exit.fish != state.last_fish {
            continue;
        }

        let next = state.current_hill.map(|hill| hill.next());
        let next_available = waypoints
            .as_deref()
            .zip(next)
            .is_some_and(|(waypoints, hill)| waypoints.hill(hill).is_ok());

        if state.exiting_to_home || !next_available {
            if !state.exiting_to_home {
                warn!("No waypoint for the next hill, returning home");
            }
            return_home(&mut commands, &mut state, &mut orbit, waypoints.as_deref(), &all_fish, &rig);
            continue;
        }

        let (Some(waypoints), Some(next)) = (waypoints.as_deref(), next) else {
            continue;
        };
        state.is_exiting = false;
        state.show_next = false;
        state.current_hill = Some(next);
        let id = state.allocate_fish();
        info!("Continuing to {}", next);
        spawn_fish(&mut commands, fish_assets.as_deref(), waypoints, id, next, rig.position());
    }
}

fn return_home(
    commands: &mut Commands,
    state: &mut InteractionState,
    orbit: &mut OrbitCamera,
    waypoints: Option<&WaypointTable>,
    all_fish: &Query<Entity, With<Fish>>,
    rig: &CameraRig,
) {
    state.reset_to_home();
    for entity in all_fish {
        commands.entity(entity).despawn();
    }

    match waypoints.map(WaypointTable::default_camera) {
        Some(Ok(home)) => {
            let rotation = Transform::from_translation(home.position)
                .looking_at(orbit.target, Vec3::Y)
                .rotation;
            rig.transition_to(commands, home.position, rotation, CameraTarget::Home);
        }
        Some(Err(err)) => {
            warn!("Cannot fly home: {}", err);
            state.is_animating_camera = false;
            orbit.sync_to(rig.position());
        }
        None => {
            state.is_animating_camera = false;
            orbit.sync_to(rig.position());
        }
    }
}

/// Orbit control is available exactly when no automated move owns the camera.
pub fn sync_orbit_enabled(state: Res<InteractionState>, mut orbit: ResMut<OrbitCamera>) {
    let enabled = !state.is_animating_camera;
    if orbit.enabled != enabled {
        orbit.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::scene_positions::Waypoint;
    use crate::interaction::SequencerPlugin;
    use crate::interaction::events::SelectionSource;
    use crate::interaction::fish::FishTravel;
    use crate::interaction::state::SequencePhase;
    use crate::interaction::waypoint::HillKey;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn pose(x: f32, y: f32, z: f32) -> Waypoint {
        Waypoint {
            position: Vec3::new(x, y, z),
            rotation: Vec3::new(-0.3, 0.2, 0.0),
        }
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, SequencerPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
            .insert_resource(WaypointTable::from_waypoints([
                ("default_camera", pose(0.0, 2.0, 3.0)),
                ("hill1", pose(-1.5, 1.0, 1.0)),
                ("hill2", pose(1.0, 1.2, 0.5)),
                ("hill3", pose(0.5, 0.8, -1.5)),
                ("fish1", pose(-1.2, 0.6, 0.2)),
                ("fish2", pose(0.8, 0.7, -0.4)),
                ("fish3", pose(0.2, 0.5, -2.0)),
            ]));
        app.world_mut()
            .spawn((SceneCamera, Transform::from_xyz(0.0, 2.0, 3.0)));
        app
    }

    fn state(app: &App) -> &InteractionState {
        app.world().resource::<InteractionState>()
    }

    fn fish_count(app: &mut App) -> usize {
        app.world_mut().query::<&Fish>().iter(app.world()).count()
    }

    fn camera_position(app: &mut App) -> Vec3 {
        app.world_mut()
            .query_filtered::<&Transform, With<SceneCamera>>()
            .single(app.world())
            .unwrap()
            .translation
    }

    fn run_until(app: &mut App, mut done: impl FnMut(&mut App) -> bool) {
        for _ in 0..400 {
            app.update();
            if done(app) {
                return;
            }
        }
        panic!("condition not reached");
    }

    fn select(app: &mut App, hill: HillKey) {
        app.world_mut().send_event(HillSelected {
            hill,
            source: SelectionSource::Pointer,
        });
    }

    #[test]
    fn selection_spawns_behind_camera_and_locks_orbit() {
        let mut app = app();
        select(&mut app, HillKey::Hill1);
        app.update();

        let state = state(&app);
        assert_eq!(state.phase(), SequencePhase::Spawning);
        assert!(state.is_animating_camera);
        assert!(state.has_clicked_hill);
        assert!(!app.world().resource::<OrbitCamera>().enabled);

        let travel = app
            .world_mut()
            .query::<&FishTravel>()
            .single(app.world())
            .unwrap();
        assert_eq!(travel.path.start, Vec3::new(0.0, 2.0, 1.5));
    }

    #[test]
    fn arrival_zooms_camera_onto_hill() {
        let mut app = app();
        select(&mut app, HillKey::Hill2);
        run_until(&mut app, |app| state(app).show_next);

        let state = state(&app);
        assert!(state.is_zoom_mode);
        assert_eq!(state.current_hill, Some(HillKey::Hill2));
        assert!(camera_position(&mut app).abs_diff_eq(Vec3::new(1.0, 1.2, 0.5), 1e-5));

        let (fish, transform) = app
            .world_mut()
            .query::<(&Fish, &Transform)>()
            .single(app.world())
            .unwrap();
        assert_eq!(fish.phase, FishPhase::Arrived);
        assert_eq!(transform.translation, Vec3::new(0.8, 0.7, -0.4));
        assert_eq!(transform.rotation, pose(0.0, 0.0, 0.0).rotation_quat());
    }

    #[test]
    fn next_advances_around_the_ring_keeping_one_fish() {
        let mut app = app();
        select(&mut app, HillKey::Hill3);
        run_until(&mut app, |app| state(app).show_next);

        app.world_mut().send_event(NextHillRequested);
        run_until(&mut app, |app| state(app).phase() == SequencePhase::Spawning);
        assert_eq!(state(&app).current_hill, Some(HillKey::Hill1));

        run_until(&mut app, |app| state(app).show_next);
        assert_eq!(fish_count(&mut app), 1);
        assert!(camera_position(&mut app).abs_diff_eq(Vec3::new(-1.5, 1.0, 1.0), 1e-5));
    }

    #[test]
    fn superseded_fish_is_pruned_when_new_arrival_lands() {
        let mut app = app();
        select(&mut app, HillKey::Hill1);
        run_until(&mut app, |app| state(app).show_next);

        app.world_mut().send_event(HillSelected {
            hill: HillKey::Hill2,
            source: SelectionSource::Rpc,
        });
        app.update();
        assert_eq!(fish_count(&mut app), 2);

        run_until(&mut app, |app| state(app).show_next);
        assert_eq!(fish_count(&mut app), 1);
        let live = app.world_mut().query::<&Fish>().single(app.world()).unwrap().id;
        assert_eq!(Some(live), state(&app).last_fish);
    }

    #[test]
    fn exit_to_home_restores_default_camera() {
        let mut app = app();
        select(&mut app, HillKey::Hill2);
        run_until(&mut app, |app| state(app).show_next);

        app.world_mut().send_event(ExitZoomRequested);
        run_until(&mut app, |app| !state(app).is_animating_camera);

        let state = state(&app);
        assert_eq!(state.current_hill, None);
        assert_eq!(state.phase(), SequencePhase::Idle);
        assert!(app.world().resource::<OrbitCamera>().enabled);
        assert_eq!(fish_count(&mut app), 0);
        assert!(camera_position(&mut app).abs_diff_eq(Vec3::new(0.0, 2.0, 3.0), 1e-5));
    }

    #[test]
    fn selection_during_home_flight_keeps_orbit_locked() {
        let mut app = app();
        select(&mut app, HillKey::Hill2);
        run_until(&mut app, |app| state(app).show_next);

        app.world_mut().send_event(ExitZoomRequested);
        run_until(&mut app, |app| state(app).current_hill.is_none());
        app.update();
        assert!(state(&app).is_animating_camera);

        app.world_mut().send_event(HillSelected {
            hill: HillKey::Hill1,
            source: SelectionSource::Rpc,
        });
        run_until(&mut app, |app| {
            assert!(!app.world().resource::<OrbitCamera>().enabled);
            state(app).show_next
        });

        assert_eq!(state(&app).current_hill, Some(HillKey::Hill1));
        assert!(state(&app).is_animating_camera);
        assert!(camera_position(&mut app).abs_diff_eq(Vec3::new(-1.5, 1.0, 1.0), 1e-5));
    }

    #[test]
    fn reselecting_zoomed_hill_is_ignored() {
        let mut app = app();
        select(&mut app, HillKey::Hill1);
        run_until(&mut app, |app| state(app).show_next);
        let live = state(&app).last_fish;

        select(&mut app, HillKey::Hill1);
        app.update();

        assert_eq!(state(&app).last_fish, live);
        assert!(state(&app).show_next);
        assert_eq!(fish_count(&mut app), 1);
    }

    #[test]
    fn selection_without_waypoints_is_a_no_op() {
        let mut app = app();
        app.world_mut().remove_resource::<WaypointTable>();
        select(&mut app, HillKey::Hill1);
        app.update();

        assert_eq!(state(&app).phase(), SequencePhase::Idle);
        assert!(!state(&app).is_animating_camera);
        assert_eq!(fish_count(&mut app), 0);
    }

    #[test]
    fn next_is_ignored_until_shown() {
        let mut app = app();
        select(&mut app, HillKey::Hill1);
        app.update();
        app.world_mut().send_event(NextHillRequested);
        app.update();
        assert!(!state(&app).is_exiting);
    }
}
