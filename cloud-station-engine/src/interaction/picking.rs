use crate::engine::assets::scene_positions::WaypointTable;
use crate::engine::camera::SceneCamera;
use crate::engine::scene::cloud_station::HillNode;
use crate::interaction::drag::DragTracker;
use crate::interaction::events::{HillSelected, SelectionSource};
use crate::interaction::hover::{HoverState, apply_hover_change};
use crate::interaction::state::InteractionState;
use crate::interaction::waypoint::HillKey;
use bevy::ecs::system::SystemParam;
use bevy::input::touch::Touches;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Walk up from `start` until a hill root is found.
pub fn walk_to_hill_root(
    start: Entity,
    parent_of: impl Fn(Entity) -> Option<Entity>,
    hill_of: impl Fn(Entity) -> Option<HillKey>,
) -> Option<(Entity, HillKey)> {
    let mut current = Some(start);
    while let Some(entity) = current {
        if let Some(hill) = hill_of(entity) {
            return Some((entity, hill));
        }
        current = parent_of(entity);
    }
    None
}

/// Raycasts screen positions against the triangles of the meshes under the
/// hill roots.
#[derive(SystemParam)]
pub struct HillPicker<'w, 's> {
    cameras: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<SceneCamera>>,
    windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    ray_cast: MeshRayCast<'w, 's>,
    parents: Query<'w, 's, &'static ChildOf>,
    hills: Query<'w, 's, &'static HillNode>,
}

impl HillPicker<'_, '_> {
    pub fn cursor_position(&self) -> Option<Vec2> {
        self.windows.single().ok()?.cursor_position()
    }

    /// Hill owning the nearest hill surface along `ray`. Other meshes never
    /// block the pick.
    pub fn hill_along(&mut self, ray: Ray3d) -> Option<(Entity, HillKey)> {
        let Self { ray_cast, parents, hills, .. } = self;
        if hills.is_empty() {
            return None;
        }
        let hill_root = |entity: Entity| {
            walk_to_hill_root(
                entity,
                |e| parents.get(e).ok().map(ChildOf::parent),
                |e| hills.get(e).ok().map(|node| node.0),
            )
        };
        let on_hill = |entity: Entity| hill_root(entity).is_some();
        let settings = MeshRayCastSettings::default()
            .with_visibility(RayCastVisibility::Any)
            .with_filter(&on_hill);

        let (entity, _) = ray_cast.cast_ray(ray, &settings).first()?;
        hill_root(*entity)
    }

    /// Hill under `screen_position`, seen through the scene camera.
    pub fn hill_at(&mut self, screen_position: Vec2) -> Option<(Entity, HillKey)> {
        let (camera, camera_xf) = self.cameras.single().ok()?;
        let ray = camera.viewport_to_world(camera_xf, screen_position).ok()?;
        self.hill_along(ray)
    }

    pub fn hill_under_cursor(&mut self) -> Option<(Entity, HillKey)> {
        self.hill_at(self.cursor_position()?)
    }
}

pub fn track_pointer_drag(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut cursor_moved: EventReader<CursorMoved>,
    touches: Res<Touches>,
    picker: HillPicker,
    mut tracker: ResMut<DragTracker>,
) {
    if mouse_button.just_pressed(MouseButton::Left) {
        if let Some(position) = picker.cursor_position() {
            tracker.press(position);
        }
    }
    for touch in touches.iter_just_pressed() {
        tracker.press(touch.position());
    }

    for moved in cursor_moved.read() {
        tracker.moved(moved.position);
    }
    for touch in touches.iter() {
        tracker.moved(touch.position());
    }
}

pub fn update_hill_hover(
    mut commands: Commands,
    state: Res<InteractionState>,
    mut picker: HillPicker,
    mut hover: ResMut<HoverState>,
) {
    let under_pointer = if state.is_animating_camera {
        None
    } else {
        picker.hill_under_cursor().map(|(entity, _)| entity)
    };

    if let Some(change) = hover.update(state.is_animating_camera, under_pointer) {
        apply_hover_change(&mut commands, change);
    }
}

/// Left click or tap on a hill selects it, unless it ended a drag.
pub fn handle_hill_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    state: Res<InteractionState>,
    waypoints: Option<Res<WaypointTable>>,
    mut picker: HillPicker,
    buttons: Query<&Interaction, With<Button>>,
    mut tracker: ResMut<DragTracker>,
    mut selections: EventWriter<HillSelected>,
) {
    let click_at = if mouse_button.just_released(MouseButton::Left) {
        picker.cursor_position()
    } else {
        touches.iter_just_released().next().map(|touch| touch.position())
    };
    let Some(click_at) = click_at else {
        return;
    };

    if tracker.consume_click() || state.is_animating_camera {
        return;
    }
    // Presses on overlay buttons never reach the scene.
    if buttons.iter().any(|interaction| *interaction != Interaction::None) {
        return;
    }
    let Some((_, hill)) = picker.hill_at(click_at) else {
        return;
    };
    let Some(waypoints) = waypoints.as_deref() else {
        return;
    };
    if let Err(err) = waypoints.hill(hill) {
        debug!("Click on {} ignored: {}", hill, err);
        return;
    }

    selections.write(HillSelected {
        hill,
        source: SelectionSource::Pointer,
    });
}
