/// Cloud station glTF scene, relative to the asset root.
pub const CLOUD_STATION_SCENE: &str = "cloud_station/scene.gltf";

/// Fish model spawned for every hill visit.
pub const FISH_MODEL: &str = "cloud_station/showing_fish.glb";

/// Camera and fish waypoint table.
pub const CAMERA_SCENE_POSITIONS: &str = "cloud_station/camera_scene_pos.waypoints.json";

/// Card text for the home stages and the hills.
pub const INFO_CONTENT: &str = "content/info.content.json";

pub const HOME_MUSIC: &str = "sounds/musics/piano 02 ill leave the light on.ogg";
pub const CLOUD_STATION_MUSIC: &str = "sounds/musics/piano 01 walking on the ocean floor.ogg";
pub const FISH_SWIM_EFFECT: &str = "sounds/effects/fish_swim.mp3";

/// Node names inside the cloud station scene.
pub const SKYBOX_NODE: &str = "skybox_GEO";
pub const SKYBOX_MATERIAL_NODE: &str = "skybox_GEO_sky_MAT_0";
pub const HILL_NODE_PREFIX: &str = "hill_";

/// Page routes the host site serves.
pub const HOME_ROUTE: &str = "/";
pub const CLOUD_STATION_ROUTE: &str = "/cloud-station";
