use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::{CAMERA_FAR, CAMERA_NEAR};

// Crate engine modules
use crate::engine::assets::info_content::InfoContent;
use crate::engine::assets::scene_positions::CameraScenePositions;
use crate::engine::camera::SceneCamera;
use crate::engine::camera::orbit_camera::{OrbitCamera, apply_orbit_camera, orbit_camera_input};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{
    ConfigLoader, resolve_info_content, resolve_scene_positions, start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::animation::{
    AnimationLibrary, build_animation_graphs, start_scene_animations,
};
use crate::engine::scene::cloud_station::spawn_lighting;
use crate::engine::scene::outline::draw_hill_outline;
use crate::engine::systems::camera_logger::{CameraLogger, log_camera_pose};
use crate::engine::systems::tutorial_bubble::{TutorialBubble, update_tutorial_bubble};
// Interaction, audio and overlays
use crate::audio::SoundPlugin;
use crate::interaction::{InteractionPlugin, SequencerSet};
use crate::ui::OverlayPlugin;
// Host page bridge
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::camera_logger::toggle_camera_logger;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Waypoint and content tables, told apart by their compound extensions.
        .add_plugins(JsonAssetPlugin::<CameraScenePositions>::new(&["waypoints.json"]))
        .add_plugins(JsonAssetPlugin::<InfoContent>::new(&["content.json"]))
        .add_plugins(InteractionPlugin)
        .add_plugins(SoundPlugin)
        .add_plugins(OverlayPlugin)
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<AnimationLibrary>()
        .init_resource::<TutorialBubble>()
        .init_resource::<CameraLogger>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                resolve_scene_positions,
                resolve_info_content,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        // Station clips start while loading, fish clips whenever a fish spawns.
        .add_systems(Update, (build_animation_graphs, start_scene_animations).chain());

    let runtime_systems = (
        orbit_camera_input.before(SequencerSet),
        apply_orbit_camera.after(SequencerSet),
        update_tutorial_bubble.after(SequencerSet),
        draw_hill_outline,
        log_camera_pose,
    );
    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, toggle_camera_logger);
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, orbit: Res<OrbitCamera>) {
    spawn_lighting(&mut commands);
    commands.spawn((
        Name::new("SceneCamera"),
        SceneCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        orbit.transform(),
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
