use glam::{Mat4, Vec2, Vec3};

use crate::api::types::EntityId;
use crate::systems::planet::PlanetNodes;

/// World-space ray from the camera through a screen point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Unproject a point in normalized device coordinates (x, y in [-1, 1],
    /// y up) through the inverse view-projection. Depth runs 0..1.
    pub fn from_ndc(ndc: Vec2, inverse_view_proj: Mat4) -> Option<Self> {
        let near = inverse_view_proj.project_point3(ndc.extend(0.0));
        let far = inverse_view_proj.project_point3(ndc.extend(1.0));
        let direction = (far - near).normalize_or_zero();
        if direction == Vec3::ZERO || !near.is_finite() {
            return None;
        }
        Some(Self { origin: near, direction })
    }

    /// Distance along the ray to the first intersection with a sphere.
    /// A ray starting inside the sphere hits at its exit point.
    pub fn hit_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt = disc.sqrt();
        let near = -b - sqrt;
        let far = -b + sqrt;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// Nearest planet hit by the ray, tested against live positions and
/// emphasised radii.
pub fn pick(ray: &Ray, nodes: &PlanetNodes, emphasis_scale: f32) -> Option<EntityId> {
    nodes
        .iter()
        .filter_map(|node| {
            ray.hit_sphere(node.position(), node.render_radius(emphasis_scale))
                .map(|t| (t, node))
        })
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, node)| node.id.clone())
}
