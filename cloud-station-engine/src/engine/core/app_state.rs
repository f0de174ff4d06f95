use crate::engine::loading::progress::LoadingProgress;
use bevy::prelude::*;
use constants::animation::LOADING_OVERLAY_DELAY_SECS;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Switch to `Running` a short moment after everything has loaded, so the
/// loading overlay does not flash away on the same frame the scene appears.
pub fn transition_to_running(
    time: Res<Time>,
    loading_progress: Res<LoadingProgress>,
    mut delay: Local<Option<Timer>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !loading_progress.is_loaded() {
        return;
    }

    let timer = delay.get_or_insert_with(|| {
        println!("✓ Cloud station loaded");
        Timer::from_seconds(LOADING_OVERLAY_DELAY_SECS, TimerMode::Once)
    });
    if timer.tick(time.delta()).just_finished() {
        println!("→ All systems ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn loading_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .add_systems(
                Update,
                transition_to_running.run_if(in_state(AppState::Loading)),
            );
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn stays_loading_until_every_milestone_is_reached() {
        let mut app = loading_app();
        {
            let mut progress = app.world_mut().resource_mut::<LoadingProgress>();
            progress.scene_spawned = true;
            progress.positions_resolved = true;
        }
        for _ in 0..10 {
            app.update();
        }
        assert_eq!(state(&app), AppState::Loading);
    }

    #[test]
    fn runs_after_the_overlay_delay() {
        let mut app = loading_app();
        {
            let mut progress = app.world_mut().resource_mut::<LoadingProgress>();
            progress.scene_spawned = true;
            progress.positions_resolved = true;
            progress.content_resolved = true;
        }

        // First update has no elapsed time, then 100 ms per frame.
        app.update();
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Loading);

        for _ in 0..3 {
            app.update();
        }
        assert_eq!(state(&app), AppState::Running);
    }
}
