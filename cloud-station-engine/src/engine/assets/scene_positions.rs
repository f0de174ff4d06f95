use crate::engine::assets::lookup::LookupError;
use crate::interaction::waypoint::HillKey;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Key of the pose the camera returns to when leaving zoom mode.
pub const DEFAULT_CAMERA_KEY: &str = "default_camera";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseParseError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("value {0} is not finite")]
    NotFinite(f32),
}

/// Numeric field of the exported table. The exporter writes strings, but
/// hand-edited files sometimes carry plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f32),
    Text(String),
}

impl RawNumber {
    pub fn parse(&self) -> Result<f32, PoseParseError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text
                .trim()
                .parse::<f32>()
                .map_err(|_| PoseParseError::NotANumber(text.clone()))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(PoseParseError::NotFinite(value))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVec3 {
    pub x: RawNumber,
    pub y: RawNumber,
    pub z: RawNumber,
}

impl RawVec3 {
    pub fn parse(&self) -> Result<Vec3, PoseParseError> {
        Ok(Vec3::new(self.x.parse()?, self.y.parse()?, self.z.parse()?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPose {
    pub pos: RawVec3,
    pub rotation: RawVec3,
}

/// Scene position table as exported from the modelling tool. Mirrors the JSON
/// exactly: `{ "hill1": { "pos": {..}, "rotation": {..} }, ... }`.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraScenePositions {
    pub entries: HashMap<String, RawPose>,
}

/// A named pose: world position plus XYZ Euler rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Waypoint {
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }
}

/// Parsed, immutable waypoint table. Inserted as a resource once the
/// scene positions asset has loaded; absent until then.
#[derive(Resource, Debug, Clone, Default)]
pub struct WaypointTable {
    entries: HashMap<String, Waypoint>,
}

impl WaypointTable {
    /// Parse every entry, dropping the ones with unreadable numbers.
    pub fn from_positions(positions: &CameraScenePositions) -> Self {
        let mut entries = HashMap::with_capacity(positions.entries.len());

        for (key, raw) in &positions.entries {
            let parsed = raw
                .pos
                .parse()
                .and_then(|position| Ok(Waypoint { position, rotation: raw.rotation.parse()? }));

            match parsed {
                Ok(waypoint) => {
                    entries.insert(key.clone(), waypoint);
                }
                Err(err) => warn!("Dropping waypoint `{}`: {}", key, err),
            }
        }

        Self { entries }
    }

    pub fn from_waypoints<'a>(waypoints: impl IntoIterator<Item = (&'a str, Waypoint)>) -> Self {
        Self {
            entries: waypoints
                .into_iter()
                .map(|(key, waypoint)| (key.to_string(), waypoint))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Result<&Waypoint, LookupError> {
        self.entries
            .get(key)
            .ok_or_else(|| LookupError::Waypoint(key.to_string()))
    }

    /// Camera pose for a hill.
    pub fn hill(&self, hill: HillKey) -> Result<&Waypoint, LookupError> {
        self.get(hill.waypoint_key())
    }

    /// Resting pose of the fish visiting a hill.
    pub fn fish_pose(&self, hill: HillKey) -> Result<&Waypoint, LookupError> {
        self.get(hill.fish_key())
    }

    pub fn default_camera(&self) -> Result<&Waypoint, LookupError> {
        self.get(DEFAULT_CAMERA_KEY)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EXPORTED: &str = r#"{
        "default_camera": { "pos": { "x": "0", "y": "2", "z": "3" }, "rotation": { "x": "0", "y": "0", "z": "0" } },
        "hill1": { "pos": { "x": "-1.25", "y": "0.8", "z": "1.5" }, "rotation": { "x": "-0.2", "y": "0.4", "z": "0.0" } },
        "fish1": { "pos": { "x": -1.0, "y": 0.5, "z": 0.75 }, "rotation": { "x": 0, "y": 1.57, "z": 0 } },
        "hill2": { "pos": { "x": "oops", "y": "0", "z": "0" }, "rotation": { "x": "0", "y": "0", "z": "0" } }
    }"#;

    fn table() -> WaypointTable {
        let positions: CameraScenePositions = serde_json::from_str(EXPORTED).unwrap();
        WaypointTable::from_positions(&positions)
    }

    #[test]
    fn string_and_number_fields_both_parse() {
        let table = table();

        let hill = table.hill(HillKey::Hill1).unwrap();
        assert_abs_diff_eq!(hill.position.x, -1.25);
        assert_abs_diff_eq!(hill.rotation.y, 0.4);

        let fish = table.fish_pose(HillKey::Hill1).unwrap();
        assert_abs_diff_eq!(fish.position.z, 0.75);
        assert_abs_diff_eq!(fish.rotation.y, 1.57);

        let home = table.default_camera().unwrap();
        assert_eq!(home.position, Vec3::new(0.0, 2.0, 3.0));
    }

    #[test]
    fn unparseable_entries_are_dropped() {
        let table = table();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.hill(HillKey::Hill2),
            Err(LookupError::Waypoint("hill2".to_string()))
        );
    }

    #[test]
    fn missing_keys_report_the_key() {
        let err = table().fish_pose(HillKey::Hill3).unwrap_err();
        assert_eq!(err.to_string(), "no waypoint named `fish3`");
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let value = RawNumber::Text("inf".to_string());
        assert!(matches!(value.parse(), Err(PoseParseError::NotFinite(_))));
    }

    #[test]
    fn rotation_uses_xyz_euler_order() {
        let waypoint = Waypoint {
            position: Vec3::ZERO,
            rotation: Vec3::new(0.3, -0.7, 0.2),
        };
        let expected = Quat::from_rotation_x(0.3)
            * Quat::from_rotation_y(-0.7)
            * Quat::from_rotation_z(0.2);
        assert!(waypoint.rotation_quat().abs_diff_eq(expected, 1e-6));
    }
}
