use crate::interaction::fish::FishId;
use crate::interaction::waypoint::HillKey;
use bevy::prelude::*;
use serde::Serialize;

/// Coarse phase of the hill tour, derived from [`InteractionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencePhase {
    Idle,
    Spawning,
    Zoomed,
    Exiting,
}

/// Page-level interaction state shared by the pointer, camera, fish and
/// overlay systems.
#[derive(Resource, Debug, Clone, Default, Serialize)]
pub struct InteractionState {
    pub current_hill: Option<HillKey>,
    /// An automated move owns the camera. Hover and click on hills are
    /// suppressed and orbit control is off.
    pub is_animating_camera: bool,
    pub is_exiting: bool,
    pub is_zoom_mode: bool,
    pub show_next: bool,
    #[serde(skip)]
    pub last_fish: Option<FishId>,
    pub exiting_to_home: bool,
    pub has_clicked_hill: bool,
    #[serde(skip)]
    next_fish_id: u64,
}

impl InteractionState {
    pub fn phase(&self) -> SequencePhase {
        if self.is_exiting {
            SequencePhase::Exiting
        } else if self.is_zoom_mode {
            SequencePhase::Zoomed
        } else if self.current_hill.is_some() {
            SequencePhase::Spawning
        } else {
            SequencePhase::Idle
        }
    }

    /// Hand out the next fish id and remember it as the live one.
    pub fn allocate_fish(&mut self) -> FishId {
        self.next_fish_id += 1;
        let id = FishId(self.next_fish_id);
        self.last_fish = Some(id);
        id
    }

    /// Back to the untouched home view. `has_clicked_hill` and the id counter
    /// survive so the tutorial stays dismissed and ids keep increasing.
    pub fn reset_to_home(&mut self) {
        self.current_hill = None;
        self.is_exiting = false;
        self.is_zoom_mode = false;
        self.show_next = false;
        self.last_fish = None;
        self.exiting_to_home = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_follows_flags() {
        let mut state = InteractionState::default();
        assert_eq!(state.phase(), SequencePhase::Idle);

        state.current_hill = Some(HillKey::Hill1);
        assert_eq!(state.phase(), SequencePhase::Spawning);

        state.is_zoom_mode = true;
        assert_eq!(state.phase(), SequencePhase::Zoomed);

        state.is_exiting = true;
        assert_eq!(state.phase(), SequencePhase::Exiting);
    }

    #[test]
    fn fish_ids_increase_and_survive_reset() {
        let mut state = InteractionState::default();
        let first = state.allocate_fish();
        let second = state.allocate_fish();
        assert!(second > first);
        assert_eq!(state.last_fish, Some(second));

        state.has_clicked_hill = true;
        state.reset_to_home();
        assert_eq!(state.last_fish, None);
        assert!(state.has_clicked_hill);
        assert!(state.allocate_fish() > second);
    }
}
