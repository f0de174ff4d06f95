use bevy::prelude::*;

/// Marks the hill root currently drawn with an outline.
#[derive(Component, Debug)]
pub struct Highlighted;

/// What to do with the outline after a hover update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverChange {
    pub cleared: Option<Entity>,
    pub highlighted: Option<Entity>,
}

/// Hill root under the pointer. At most one hill is highlighted.
#[derive(Resource, Debug, Default)]
pub struct HoverState {
    hovered: Option<Entity>,
}

impl HoverState {
    pub fn hovered(&self) -> Option<Entity> {
        self.hovered
    }

    /// Move the highlight to `under_pointer`. While the camera is animating
    /// nothing can be highlighted and any existing outline is cleared.
    pub fn update(&mut self, camera_animating: bool, under_pointer: Option<Entity>) -> Option<HoverChange> {
        let next = if camera_animating { None } else { under_pointer };
        if next == self.hovered {
            return None;
        }
        let change = HoverChange {
            cleared: self.hovered,
            highlighted: next,
        };
        self.hovered = next;
        Some(change)
    }
}

pub fn apply_hover_change(commands: &mut Commands, change: HoverChange) {
    if let Some(previous) = change.cleared {
        if let Ok(mut entity) = commands.get_entity(previous) {
            entity.remove::<Highlighted>();
        }
    }
    if let Some(hill) = change.highlighted {
        commands.entity(hill).insert(Highlighted);
    }
}
