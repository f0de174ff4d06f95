use crate::engine::camera::SceneCamera;
use crate::engine::core::app_state::AppState;
use crate::engine::scene::cloud_station::HillNode;
use crate::interaction::fish::Fish;
use crate::interaction::state::InteractionState;
use crate::interaction::waypoint::HillKey;
use bevy::prelude::*;
use constants::camera::TUTORIAL_BUBBLE_Y_OFFSET;

/// "Click on a hill" hint, anchored above the first hill in screen space.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct TutorialBubble {
    pub visible: bool,
    pub screen_position: Option<Vec2>,
}

/// The hint only shows before the first hill click, while no fish is around.
pub fn bubble_visible(loaded: bool, state: &InteractionState, fish_count: usize) -> bool {
    loaded && !state.has_clicked_hill && fish_count == 0
}

pub fn update_tutorial_bubble(
    app_state: Res<State<AppState>>,
    state: Res<InteractionState>,
    fish: Query<(), With<Fish>>,
    hills: Query<(&HillNode, &GlobalTransform)>,
    cameras: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    mut bubble: ResMut<TutorialBubble>,
) {
    let visible = bubble_visible(
        *app_state.get() == AppState::Running,
        &state,
        fish.iter().count(),
    );

    let screen_position = if visible {
        let anchor = hills
            .iter()
            .find(|(hill, _)| hill.0 == HillKey::Hill1)
            .map(|(_, xf)| xf.translation() + Vec3::Y * TUTORIAL_BUBBLE_Y_OFFSET);
        cameras.single().ok().zip(anchor).and_then(|((camera, camera_xf), anchor)| {
            camera.world_to_viewport(camera_xf, anchor).ok()
        })
    } else {
        None
    };

    bubble.set_if_neq(TutorialBubble {
        visible: visible && screen_position.is_some(),
        screen_position,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bubble_hides_after_first_click_or_while_fish_exist() {
        let mut state = InteractionState::default();
        assert!(bubble_visible(true, &state, 0));
        assert!(!bubble_visible(false, &state, 0));
        assert!(!bubble_visible(true, &state, 1));

        state.has_clicked_hill = true;
        assert!(!bubble_visible(true, &state, 0));

        // Returning home does not bring the hint back.
        state.reset_to_home();
        assert!(!bubble_visible(true, &state, 0));
    }
}
