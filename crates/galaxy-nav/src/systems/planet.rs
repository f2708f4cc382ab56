use std::f64::consts::TAU;

use glam::Vec3;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::registry::EntityRegistry;
use crate::core::selection::SelectionState;
use crate::extensions::damping::damp;

/// Read-only query for where an entity is this frame.
/// The single source of live positions for the camera, minimap and picking.
pub trait LiveTransforms {
    fn live_position(&self, id: &EntityId) -> Option<Vec3>;
}

/// Pointer interaction on a planet node. Nodes only report these;
/// the input router turns them into selection commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeEvent {
    PointerEnter(EntityId),
    PointerLeave(EntityId),
    Click(EntityId),
}

/// Position on a circular orbit around the world origin at time `elapsed`.
/// The phase is wrapped to [0, 2π) in f64 so long sessions keep precision.
pub fn orbital_position(radius: f32, angular_speed: f32, base_y: f32, elapsed: f64) -> Vec3 {
    let phase = (angular_speed as f64 * elapsed).rem_euclid(TAU) as f32;
    Vec3::new(phase.cos() * radius, base_y, phase.sin() * radius)
}

/// Animated state of one entity: spin phase, emphasis and live position.
#[derive(Debug, Clone)]
pub struct PlanetNode {
    pub id: EntityId,
    anchor: Vec3,
    orbit_radius: f32,
    orbit_speed: f32,
    rotation_speed: f32,
    size: f32,
    spin: f32,
    emphasis: f32,
    position: Vec3,
}

impl PlanetNode {
    pub fn from_entity(entity: &Entity) -> Self {
        let mut node = Self {
            id: entity.id.clone(),
            anchor: entity.world_position,
            orbit_radius: entity.orbit_radius,
            orbit_speed: entity.orbit_angular_speed,
            rotation_speed: entity.self_rotation_speed,
            size: entity.visual_size,
            spin: 0.0,
            emphasis: 0.0,
            position: entity.world_position,
        };
        node.position = node.position_at(0.0);
        node
    }

    fn position_at(&self, elapsed: f64) -> Vec3 {
        if self.orbit_radius > 0.0 {
            orbital_position(self.orbit_radius, self.orbit_speed, self.anchor.y, elapsed)
        } else {
            self.anchor
        }
    }

    /// Advance one tick. Position follows `elapsed`; spin and emphasis
    /// integrate `dt`.
    pub fn advance(&mut self, elapsed: f64, dt: f32, emphasised: bool, smoothing: f32) {
        self.position = self.position_at(elapsed);
        self.spin = (self.spin + self.rotation_speed * dt).rem_euclid(std::f32::consts::TAU);
        let target = if emphasised { 1.0 } else { 0.0 };
        self.emphasis = damp(self.emphasis, target, smoothing, dt).clamp(0.0, 1.0);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn emphasis(&self) -> f32 {
        self.emphasis
    }

    /// Sphere radius including the emphasis boost.
    pub fn render_radius(&self, emphasis_scale: f32) -> f32 {
        self.size * (1.0 + emphasis_scale * self.emphasis)
    }
}

/// All planet nodes, in registry order.
#[derive(Debug, Clone, Default)]
pub struct PlanetNodes {
    nodes: Vec<PlanetNode>,
}

impl PlanetNodes {
    pub fn from_registry(registry: &EntityRegistry) -> Self {
        Self {
            nodes: registry.iter().map(PlanetNode::from_entity).collect(),
        }
    }

    /// Advance every node for this tick.
    pub fn advance(&mut self, elapsed: f64, dt: f32, state: &SelectionState, smoothing: f32) {
        for node in &mut self.nodes {
            let emphasised = state.is_emphasised(&node.id);
            node.advance(elapsed, dt, emphasised, smoothing);
        }
    }

    pub fn get(&self, id: &EntityId) -> Option<&PlanetNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanetNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl LiveTransforms for PlanetNodes {
    fn live_position(&self, id: &EntityId) -> Option<Vec3> {
        self.get(id).map(PlanetNode::position)
    }
}
