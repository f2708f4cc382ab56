use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::content::EntityContent;
use crate::components::visual::{Color, RingDescriptor};

/// How the overlay treats an entity when it gains focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntityKind {
    /// Content surface only.
    #[default]
    #[serde(rename = "default")]
    Standard,
    /// Content surface rendering a timeline payload.
    #[serde(rename = "timeline")]
    Timeline,
    /// Content surface plus the chat surface (the AI entity).
    #[serde(rename = "ai")]
    Conversational,
}

/// A selectable world object (planet). Immutable once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique key.
    pub id: EntityId,
    pub display_name: String,
    pub description: String,
    /// Orbital anchor. Stationary entities sit here; orbiting entities keep its `y`.
    pub world_position: Vec3,
    /// Orbit radius around the world origin. 0 means stationary.
    pub orbit_radius: f32,
    /// Orbit angular speed in radians per second.
    pub orbit_angular_speed: f32,
    /// Self-rotation speed in radians per second.
    pub self_rotation_speed: f32,
    /// Sphere radius in world units.
    pub visual_size: f32,
    pub color: Color,
    pub ring: Option<RingDescriptor>,
    pub kind: EntityKind,
    pub content: EntityContent,
}

impl Entity {
    /// Create a stationary unit-sized entity at the origin.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            description: String::new(),
            world_position: Vec3::ZERO,
            orbit_radius: 0.0,
            orbit_angular_speed: 0.0,
            self_rotation_speed: 0.0,
            visual_size: 1.0,
            color: Color::WHITE,
            ring: None,
            kind: EntityKind::Standard,
            content: EntityContent::default(),
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.world_position = position;
        self
    }

    pub fn with_orbit(mut self, radius: f32, angular_speed: f32) -> Self {
        self.orbit_radius = radius;
        self.orbit_angular_speed = angular_speed;
        self
    }

    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.self_rotation_speed = speed;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.visual_size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_ring(mut self, ring: RingDescriptor) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_content(mut self, content: EntityContent) -> Self {
        self.content = content;
        self
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbit_radius > 0.0
    }

    pub fn is_conversational(&self) -> bool {
        self.kind == EntityKind::Conversational
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        EntityId(id)
    }
}
