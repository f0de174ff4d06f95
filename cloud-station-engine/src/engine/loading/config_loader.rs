use crate::engine::assets::info_content::InfoContent;
use crate::engine::assets::scene_positions::{CameraScenePositions, WaypointTable};
use crate::engine::camera::SceneCamera;
use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::animation::SceneGltfs;
use crate::engine::scene::cloud_station::spawn_cloud_station;
use crate::interaction::fish::FishAssets;
use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::{CAMERA_SCENE_POSITIONS, CLOUD_STATION_SCENE, FISH_MODEL, INFO_CONTENT};

#[derive(Resource, Default)]
pub struct ConfigLoader {
    positions: Option<Handle<CameraScenePositions>>,
    content: Option<Handle<InfoContent>>,
}

// Kick off every asset the scene needs
pub fn start_loading(
    mut commands: Commands,
    mut config_loader: ResMut<ConfigLoader>,
    asset_server: Res<AssetServer>,
) {
    println!("Loading cloud station:");
    println!("  Scene: {}", CLOUD_STATION_SCENE);
    println!("  Fish: {}", FISH_MODEL);
    println!("  Waypoints: {}", CAMERA_SCENE_POSITIONS);
    println!("  Content: {}", INFO_CONTENT);

    config_loader.positions = Some(asset_server.load(CAMERA_SCENE_POSITIONS));
    config_loader.content = Some(asset_server.load(INFO_CONTENT));

    commands.insert_resource(SceneGltfs {
        station: asset_server.load(CLOUD_STATION_SCENE),
        fish: asset_server.load(FISH_MODEL),
    });
    commands.insert_resource(FishAssets {
        scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(FISH_MODEL)),
    });

    spawn_cloud_station(&mut commands, &asset_server);
}

fn load_failed<A: Asset>(asset_server: &AssetServer, handle: &Handle<A>) -> Option<String> {
    match asset_server.get_load_state(handle) {
        Some(LoadState::Failed(err)) => Some(err.to_string()),
        _ => None,
    }
}

/// Build the waypoint table and move the camera to `default_camera`.
pub fn resolve_scene_positions(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    positions: Res<Assets<CameraScenePositions>>,
    mut orbit: ResMut<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<SceneCamera>>,
) {
    if loading_progress.positions_resolved {
        return;
    }
    let Some(handle) = config_loader.positions.as_ref() else {
        return;
    };

    if let Some(raw) = positions.get(handle) {
        let table = WaypointTable::from_positions(raw);
        println!("✓ Scene positions loaded ({} waypoints)", table.len());

        match table.default_camera() {
            Ok(home) => {
                orbit.sync_to(home.position);
                if let Ok(mut camera) = cameras.single_mut() {
                    *camera = Transform::from_translation(home.position)
                        .looking_at(orbit.target, Vec3::Y);
                }
            }
            Err(err) => warn!("Keeping fallback camera: {}", err),
        }

        commands.insert_resource(table);
        loading_progress.positions_resolved = true;
    } else if let Some(err) = load_failed(&asset_server, handle) {
        error!("Failed to load {}: {}", CAMERA_SCENE_POSITIONS, err);
        loading_progress.positions_resolved = true;
    }
}

pub fn resolve_info_content(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    contents: Res<Assets<InfoContent>>,
) {
    if loading_progress.content_resolved {
        return;
    }
    let Some(handle) = config_loader.content.as_ref() else {
        return;
    };

    if let Some(content) = contents.get(handle) {
        println!("✓ Content loaded ({} hill cards)", content.hills.len());
        commands.insert_resource(content.clone());
        loading_progress.content_resolved = true;
    } else if let Some(err) = load_failed(&asset_server, handle) {
        error!("Failed to load {}: {}", INFO_CONTENT, err);
        loading_progress.content_resolved = true;
    }
}
