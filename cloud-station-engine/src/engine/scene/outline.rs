use crate::interaction::hover::Highlighted;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use constants::render_settings::HILL_OUTLINE_COLOUR;

/// Outline every mesh of the highlighted hill with its bounding box.
pub fn draw_hill_outline(
    mut gizmos: Gizmos,
    highlighted: Query<Entity, With<Highlighted>>,
    children: Query<&Children>,
    meshes: Query<(&Aabb, &GlobalTransform), With<Mesh3d>>,
) {
    for hill in &highlighted {
        for node in std::iter::once(hill).chain(children.iter_descendants(hill)) {
            let Ok((aabb, xf)) = meshes.get(node) else {
                continue;
            };
            let local = Transform::from_translation(Vec3::from(aabb.center))
                .with_scale(Vec3::from(aabb.half_extents) * 2.0);
            gizmos.cuboid(xf.mul_transform(local), HILL_OUTLINE_COLOUR);
        }
    }
}
