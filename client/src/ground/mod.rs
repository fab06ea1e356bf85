use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::prelude::*;

/// Marker for the terrain scene root; its mesh descendants are collidable.
#[derive(Component)]
pub struct Terrain;

/// Nearest intersection of a downward ray with the terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    pub point: Vec3,
    pub distance: f32,
}

/// Cast a ray straight down from `origin` against every mesh in the terrain
/// root's subtree and return the nearest hit within `max_distance`, or
/// `None`. Pure query; descends arbitrarily deep mesh hierarchies.
pub fn cast_down(
    origin: Vec3,
    max_distance: f32,
    root: Entity,
    children: &Query<&Children>,
    mesh_instances: &Query<(&Mesh3d, &GlobalTransform)>,
    meshes: &Assets<Mesh>,
) -> Option<GroundHit> {
    let mut nearest: Option<GroundHit> = None;
    let mut queue = vec![root];
    while let Some(entity) = queue.pop() {
        if let Ok((mesh3d, global)) = mesh_instances.get(entity) {
            if let Some(mesh) = meshes.get(&mesh3d.0) {
                if let Some(hit) = raycast_mesh(mesh, global, origin, Vec3::NEG_Y, 0.0, max_distance)
                {
                    if nearest.is_none_or(|n| hit.distance < n.distance) {
                        nearest = Some(hit);
                    }
                }
            }
        }
        if let Ok(child_entities) = children.get(entity) {
            queue.extend(child_entities.iter());
        }
    }
    nearest
}

/// Nearest intersection of a world-space ray with a single mesh instance,
/// bounded by `[min_distance, max_distance]` along the ray.
///
/// The ray is mapped into mesh-local space without normalizing the
/// direction, so the intersection parameter stays in world-space units.
pub fn raycast_mesh(
    mesh: &Mesh,
    global: &GlobalTransform,
    origin: Vec3,
    direction: Vec3,
    min_distance: f32,
    max_distance: f32,
) -> Option<GroundHit> {
    if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
        return None;
    }
    let positions = match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
        VertexAttributeValues::Float32x3(values) => values.as_slice(),
        _ => return None,
    };

    let inverse = global.affine().inverse();
    let local_origin = inverse.transform_point3(origin);
    let local_direction = inverse.transform_vector3(direction);

    let mut nearest: Option<f32> = None;
    let mut consider = |i0: usize, i1: usize, i2: usize| {
        let (Some(a), Some(b), Some(c)) = (positions.get(i0), positions.get(i1), positions.get(i2))
        else {
            return;
        };
        if let Some(t) = ray_triangle_intersection(
            local_origin,
            local_direction,
            Vec3::from(*a),
            Vec3::from(*b),
            Vec3::from(*c),
        ) {
            if t >= min_distance && t <= max_distance && nearest.is_none_or(|n| t < n) {
                nearest = Some(t);
            }
        }
    };

    match mesh.indices() {
        Some(Indices::U16(indices)) => {
            for tri in indices.chunks_exact(3) {
                consider(tri[0] as usize, tri[1] as usize, tri[2] as usize);
            }
        }
        Some(Indices::U32(indices)) => {
            for tri in indices.chunks_exact(3) {
                consider(tri[0] as usize, tri[1] as usize, tri[2] as usize);
            }
        }
        None => {
            for base in (0..positions.len().saturating_sub(2)).step_by(3) {
                consider(base, base + 1, base + 2);
            }
        }
    }

    nearest.map(|t| GroundHit {
        point: origin + direction * t,
        distance: t,
    })
}

/// Moller-Trumbore ray/triangle intersection, double sided. Returns the ray
/// parameter of the hit; `direction` need not be normalized.
pub fn ray_triangle_intersection(
    origin: Vec3,
    direction: Vec3,
    a: Vec3,
    b: Vec3,
    c: Vec3,
) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge_ab = b - a;
    let edge_ac = c - a;
    let p = direction.cross(edge_ac);
    let det = edge_ab.dot(p);
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge_ab);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge_ac.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}
