use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::animation::AnimatedScene;
use crate::interaction::waypoint::HillKey;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::path::{CLOUD_STATION_SCENE, SKYBOX_MATERIAL_NODE, SKYBOX_NODE};
use constants::render_settings::{
    AMBIENT_LIGHT_BRIGHTNESS, DIRECTIONAL_LIGHT_ILLUMINANCE, SKYBOX_SCALE,
};

/// Root node of a clickable hill.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HillNode(pub HillKey);

#[derive(Component, Debug)]
pub struct CloudStationRoot;

pub fn spawn_cloud_station(commands: &mut Commands, asset_server: &AssetServer) {
    commands
        .spawn((
            Name::new("CloudStation"),
            CloudStationRoot,
            AnimatedScene::Station,
            SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(CLOUD_STATION_SCENE))),
        ))
        .observe(on_cloud_station_ready);
}

pub fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: DIRECTIONAL_LIGHT_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_LIGHT_BRIGHTNESS,
        ..default()
    });
}

/// What a named scene node means to the interaction layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Hill(HillKey),
    Skybox,
}

pub fn classify_node(name: &str) -> Option<NodeRole> {
    if name == SKYBOX_NODE || name == SKYBOX_MATERIAL_NODE {
        return Some(NodeRole::Skybox);
    }
    HillKey::from_node_name(name).map(NodeRole::Hill)
}

fn on_cloud_station_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    children: Query<&Children>,
    names: Query<&Name>,
    mut transforms: Query<&mut Transform>,
    mut progress: ResMut<LoadingProgress>,
) {
    let root = trigger.target();
    let mut hills = 0;

    for node in children.iter_descendants(root) {
        let Ok(name) = names.get(node) else {
            continue;
        };
        match classify_node(name.as_str()) {
            Some(NodeRole::Hill(hill)) => {
                commands.entity(node).insert(HillNode(hill));
                hills += 1;
            }
            Some(NodeRole::Skybox) => {
                if let Ok(mut transform) = transforms.get_mut(node) {
                    transform.scale = Vec3::splat(SKYBOX_SCALE);
                }
            }
            None => {}
        }
    }

    if hills < HillKey::RING.len() {
        warn!("Cloud station scene has {} of {} hills", hills, HillKey::RING.len());
    }
    info!("✓ Cloud station scene spawned");
    progress.scene_spawned = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_nodes_are_classified_by_name() {
        assert_eq!(classify_node("hill_2"), Some(NodeRole::Hill(HillKey::Hill2)));
        assert_eq!(classify_node("Hill_3"), Some(NodeRole::Hill(HillKey::Hill3)));
        assert_eq!(classify_node("skybox_GEO"), Some(NodeRole::Skybox));
        assert_eq!(classify_node("skybox_GEO_sky_MAT_0"), Some(NodeRole::Skybox));
        assert_eq!(classify_node("hill_2_GEO_grass_0"), None);
        assert_eq!(classify_node("cloud_GEO"), None);
    }
}
