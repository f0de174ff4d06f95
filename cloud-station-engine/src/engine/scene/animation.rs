use bevy::gltf::Gltf;
use bevy::prelude::*;

/// Clip the fish model swims with.
const FISH_SWIM_CLIP: &str = "take_swim";

/// Scene root whose animation players should start looping once spawned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedScene {
    Station,
    Fish,
}

/// glTF documents the animation graphs are built from.
#[derive(Resource, Debug, Clone)]
pub struct SceneGltfs {
    pub station: Handle<Gltf>,
    pub fish: Handle<Gltf>,
}

#[derive(Debug, Clone)]
pub struct SceneAnimation {
    pub graph: Handle<AnimationGraph>,
    pub nodes: Vec<AnimationNodeIndex>,
}

/// Animation graphs per scene kind, built once the glTF documents load.
#[derive(Resource, Debug, Default)]
pub struct AnimationLibrary {
    pub station: Option<SceneAnimation>,
    pub fish: Option<SceneAnimation>,
}

impl AnimationLibrary {
    pub fn get(&self, scene: AnimatedScene) -> Option<&SceneAnimation> {
        match scene {
            AnimatedScene::Station => self.station.as_ref(),
            AnimatedScene::Fish => self.fish.as_ref(),
        }
    }
}

/// Station plays every clip; the fish plays its swim clip, or every clip if
/// the model has no clip by that name.
fn clips_for(scene: AnimatedScene, gltf: &Gltf) -> Vec<Handle<AnimationClip>> {
    if scene == AnimatedScene::Fish {
        if let Some(swim) = gltf.named_animations.get(FISH_SWIM_CLIP) {
            return vec![swim.clone()];
        }
    }
    gltf.animations.clone()
}

pub fn build_animation_graphs(
    gltfs: Option<Res<SceneGltfs>>,
    gltf_assets: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut library: ResMut<AnimationLibrary>,
) {
    let Some(gltfs) = gltfs else {
        return;
    };

    for (scene, handle) in [
        (AnimatedScene::Station, &gltfs.station),
        (AnimatedScene::Fish, &gltfs.fish),
    ] {
        if library.get(scene).is_some() {
            continue;
        }
        let Some(gltf) = gltf_assets.get(handle) else {
            continue;
        };

        let (graph, nodes) = AnimationGraph::from_clips(clips_for(scene, gltf));
        info!("{:?} animation graph built with {} clip(s)", scene, nodes.len());
        let built = Some(SceneAnimation {
            graph: graphs.add(graph),
            nodes,
        });
        match scene {
            AnimatedScene::Station => library.station = built,
            AnimatedScene::Fish => library.fish = built,
        }
    }
}

/// Loop every clip on animation players spawned under an [`AnimatedScene`].
pub fn start_scene_animations(
    mut commands: Commands,
    mut players: Query<(Entity, &mut AnimationPlayer), Added<AnimationPlayer>>,
    parents: Query<&ChildOf>,
    scenes: Query<&AnimatedScene>,
    library: Res<AnimationLibrary>,
) {
    for (entity, mut player) in &mut players {
        let scene = std::iter::once(entity)
            .chain(parents.iter_ancestors(entity))
            .find_map(|ancestor| scenes.get(ancestor).ok().copied());
        let Some(animation) = scene.and_then(|scene| library.get(scene)) else {
            continue;
        };

        for node in &animation.nodes {
            player.play(*node).repeat();
        }
        commands
            .entity(entity)
            .insert(AnimationGraphHandle(animation.graph.clone()));
    }
}
