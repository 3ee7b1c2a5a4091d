use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::roll::D6_FACE_MAP;
use crate::dice3d::throw_control::DIE_SIZE;

pub fn create_d6() -> (Mesh, Collider, Vec<(Vec3, u32)>) {
    let size = DIE_SIZE;

    let face_normals = D6_FACE_MAP.to_vec();

    let mesh = Mesh::from(Cuboid::new(size, size, size));
    let collider = Collider::cuboid(size / 2.0, size / 2.0, size / 2.0);

    (mesh, collider, face_normals)
}

/// Pip centers on a face, in face-local 2D coordinates where the face spans
/// -0.5..0.5 on both axes.
pub fn pip_offsets(value: u32) -> Vec<Vec2> {
    let offset = 0.25;
    let mut pips = Vec::new();

    if value % 2 == 1 {
        pips.push(Vec2::ZERO);
    }
    if value > 1 {
        pips.push(Vec2::new(-offset, offset));
        pips.push(Vec2::new(offset, -offset));
    }
    if value > 3 {
        pips.push(Vec2::new(offset, offset));
        pips.push(Vec2::new(-offset, -offset));
    }
    if value == 6 {
        pips.push(Vec2::new(-offset, 0.0));
        pips.push(Vec2::new(offset, 0.0));
    }

    pips
}

/// Local transforms for every pip on a die, sitting just proud of each face.
pub fn pip_transforms(face_normals: &[(Vec3, u32)]) -> Vec<Transform> {
    let half = DIE_SIZE / 2.0;
    let mut transforms = Vec::new();

    for (normal, value) in face_normals {
        // Any axis perpendicular to the normal works as the face's "u" axis.
        let u = normal.any_orthonormal_vector();
        let v = normal.cross(u);
        let rotation = Quat::from_rotation_arc(Vec3::Y, *normal);

        for pip in pip_offsets(*value) {
            let position = *normal * half + (u * pip.x + v * pip.y) * DIE_SIZE;
            transforms.push(
                Transform::from_translation(position)
                    .with_rotation(rotation)
                    .with_scale(Vec3::new(1.0, 0.25, 1.0)),
            );
        }
    }

    transforms
}
