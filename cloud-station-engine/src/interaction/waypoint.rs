use constants::path::HILL_NODE_PREFIX;
use serde::{Deserialize, Serialize};

/// One of the three hills the fish can visit.
///
/// Hills form a fixed ring: `hill1 -> hill2 -> hill3 -> hill1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HillKey {
    Hill1,
    Hill2,
    Hill3,
}

impl HillKey {
    pub const RING: [HillKey; 3] = [HillKey::Hill1, HillKey::Hill2, HillKey::Hill3];

    pub fn number(self) -> u8 {
        match self {
            Self::Hill1 => 1,
            Self::Hill2 => 2,
            Self::Hill3 => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Hill1),
            2 => Some(Self::Hill2),
            3 => Some(Self::Hill3),
            _ => None,
        }
    }

    /// Next hill in ring order.
    pub fn next(self) -> Self {
        match self {
            Self::Hill1 => Self::Hill2,
            Self::Hill2 => Self::Hill3,
            Self::Hill3 => Self::Hill1,
        }
    }

    /// Camera waypoint key in the scene position table.
    pub fn waypoint_key(self) -> &'static str {
        match self {
            Self::Hill1 => "hill1",
            Self::Hill2 => "hill2",
            Self::Hill3 => "hill3",
        }
    }

    /// Fish resting pose key in the scene position table.
    pub fn fish_key(self) -> &'static str {
        match self {
            Self::Hill1 => "fish1",
            Self::Hill2 => "fish2",
            Self::Hill3 => "fish3",
        }
    }

    /// Parse a waypoint key such as `hill2`.
    pub fn from_waypoint_key(key: &str) -> Option<Self> {
        Self::RING
            .into_iter()
            .find(|hill| hill.waypoint_key().eq_ignore_ascii_case(key))
    }

    /// Parse a scene node name such as `hill_2` or `Hill_2`.
    pub fn from_node_name(name: &str) -> Option<Self> {
        let prefix = name.get(..HILL_NODE_PREFIX.len())?;
        if !prefix.eq_ignore_ascii_case(HILL_NODE_PREFIX) {
            return None;
        }
        let digits = &name[HILL_NODE_PREFIX.len()..];
        if digits.len() != 1 {
            return None;
        }
        digits.parse::<u8>().ok().and_then(Self::from_number)
    }
}

impl std::fmt::Display for HillKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.waypoint_key())
    }
}
