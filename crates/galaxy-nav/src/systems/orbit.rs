use std::f32::consts::TAU;

use glam::Vec3;

use crate::api::types::EntityId;
use crate::components::visual::Color;
use crate::core::registry::EntityRegistry;
use crate::core::selection::SelectionState;
use crate::renderer::instance::{OrbitBuffer, OrbitVertex};

/// Orbit line opacity at rest.
pub const ORBIT_ALPHA: f32 = 0.1;
/// Orbit line opacity while its planet is hovered in overview.
pub const ORBIT_HOVER_ALPHA: f32 = 0.3;

/// Precomputed closed path of one orbiting entity.
#[derive(Debug, Clone)]
pub struct OrbitPath {
    pub id: EntityId,
    /// Registry index of the owner.
    pub index: usize,
    pub color: Color,
    /// `samples + 1` points; the last repeats the first.
    pub points: Vec<Vec3>,
}

/// Draws the circular orbit of every orbiting entity.
/// Stationary entities have no path.
pub struct OrbitRenderer {
    paths: Vec<OrbitPath>,
}

impl OrbitRenderer {
    pub fn new(registry: &EntityRegistry, samples: usize) -> Self {
        let samples = samples.max(3);
        let paths = registry
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_orbiting())
            .map(|(index, e)| OrbitPath {
                id: e.id.clone(),
                index,
                color: e.color,
                points: (0..=samples)
                    .map(|i| {
                        let t = (i % samples) as f32 / samples as f32 * TAU;
                        Vec3::new(t.cos() * e.orbit_radius, e.world_position.y, t.sin() * e.orbit_radius)
                    })
                    .collect(),
            })
            .collect();
        Self { paths }
    }

    pub fn paths(&self) -> &[OrbitPath] {
        &self.paths
    }

    /// Opacity of a path for the given selection, `None` when hidden.
    ///
    /// Overview shows every path (brighter when hovered). The focused view
    /// hides all but the focused entity's own path.
    pub fn visibility(&self, id: &EntityId, state: &SelectionState) -> Option<f32> {
        match &state.selected {
            Some(selected) if selected == id => Some(ORBIT_ALPHA),
            Some(_) => None,
            None if state.is_hovered(id) => Some(ORBIT_HOVER_ALPHA),
            None => Some(ORBIT_ALPHA),
        }
    }

    /// Write visible paths into the buffer as line strips.
    pub fn write_vertices(&self, state: &SelectionState, buffer: &mut OrbitBuffer) {
        buffer.clear();
        for path in &self.paths {
            let Some(alpha) = self.visibility(&path.id, state) else {
                continue;
            };
            for p in &path.points {
                buffer.push(OrbitVertex {
                    x: p.x,
                    y: p.y,
                    z: p.z,
                    r: path.color.r,
                    g: path.color.g,
                    b: path.color.b,
                    a: alpha,
                    path: path.index as f32,
                });
            }
        }
    }
}
