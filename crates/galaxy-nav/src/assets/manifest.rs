use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::config::SceneConfig;
use crate::api::types::EntityId;
use crate::components::content::EntityContent;
use crate::components::entity::{Entity, EntityKind};
use crate::components::visual::{Color, RingSpec};
use crate::core::error::RegistryError;
use crate::core::registry::EntityRegistry;

/// Registry manifest: the planet catalog plus optional scene configuration.
/// Loaded from a JSON file bundled with the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryManifest {
    /// Scene configuration overrides. Missing fields keep their defaults.
    #[serde(default)]
    pub config: Option<SceneConfig>,
    /// Entities in declaration order.
    pub planets: Vec<EntityDescriptor>,
}

/// Describes a single planet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Sphere radius (default: 1).
    #[serde(default = "default_size")]
    pub size: f32,
    /// `#rrggbb` hex color.
    pub color: String,
    /// Anchor position `[x, y, z]`.
    #[serde(default)]
    pub position: [f32; 3],
    /// Orbit radius around the origin. 0 or absent means stationary.
    #[serde(default)]
    pub orbit_radius: f32,
    /// Orbit angular speed in radians per second.
    #[serde(default)]
    pub orbit_speed: f32,
    /// Self-rotation speed in radians per second.
    #[serde(default)]
    pub rotation_speed: f32,
    #[serde(default)]
    pub ring: Option<RingSpec>,
    #[serde(rename = "type", default)]
    pub kind: EntityKind,
    #[serde(default)]
    pub content: EntityContent,
}

fn default_size() -> f32 {
    1.0
}

impl EntityDescriptor {
    /// Convert to a runtime entity, parsing colors.
    pub fn to_entity(&self) -> Result<Entity, RegistryError> {
        let mut entity = Entity::new(EntityId::new(self.id.clone()))
            .with_name(self.name.clone())
            .with_description(self.description.clone())
            .with_position(Vec3::from_array(self.position))
            .with_orbit(self.orbit_radius, self.orbit_speed)
            .with_rotation_speed(self.rotation_speed)
            .with_size(self.size)
            .with_color(Color::from_hex(&self.color)?)
            .with_kind(self.kind)
            .with_content(self.content.clone());
        if let Some(ring) = &self.ring {
            entity = entity.with_ring(ring.to_descriptor()?);
        }
        Ok(entity)
    }
}

impl RegistryManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the planets and split into a registry and its configuration.
    pub fn into_parts(self) -> Result<(EntityRegistry, SceneConfig), RegistryError> {
        let entities = self
            .planets
            .iter()
            .map(EntityDescriptor::to_entity)
            .collect::<Result<Vec<_>, _>>()?;
        let registry = EntityRegistry::new(entities)?;
        let config = self.config.unwrap_or_default();
        config.validate()?;
        Ok((registry, config))
    }
}
