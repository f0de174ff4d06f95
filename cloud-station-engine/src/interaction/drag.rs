use bevy::prelude::*;
use constants::camera::DRAG_THRESHOLD_PX;

/// Tells orbit drags apart from clicks on a hill.
#[derive(Resource, Debug, Default)]
pub struct DragTracker {
    pressed_at: Option<Vec2>,
    dragging: bool,
}

impl DragTracker {
    pub fn press(&mut self, position: Vec2) {
        self.pressed_at = Some(position);
        self.dragging = false;
    }

    pub fn moved(&mut self, position: Vec2) {
        let Some(origin) = self.pressed_at else {
            return;
        };
        let delta = (position - origin).abs();
        if delta.x > DRAG_THRESHOLD_PX || delta.y > DRAG_THRESHOLD_PX {
            self.dragging = true;
        }
    }

    /// Called on click. Returns `true` when the click ends a drag and must be
    /// ignored; the drag flag is cleared either way.
    pub fn consume_click(&mut self) -> bool {
        self.pressed_at = None;
        std::mem::take(&mut self.dragging)
    }
}
