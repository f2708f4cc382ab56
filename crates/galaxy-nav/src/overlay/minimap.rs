use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::api::config::SceneConfig;
use crate::api::types::EntityId;
use crate::core::registry::EntityRegistry;
use crate::core::selection::SelectionState;
use crate::systems::planet::LiveTransforms;

/// One entity marker, in pixels from the minimap centre (y down = world +z).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimapMarker {
    pub id: EntityId,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub color: String,
    pub selected: bool,
    pub hovered: bool,
}

/// Top-down projection of the galaxy. Drawing and hit-testing share `scale`,
/// so a marker is always clicked where it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimap {
    /// Pixels per world unit.
    pub scale: f32,
    /// Hit radius of a marker in pixels.
    pub marker_radius: f32,
}

impl Minimap {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            scale: config.minimap_scale,
            marker_radius: config.minimap_marker_radius,
        }
    }

    /// World (x, z) to minimap pixels.
    pub fn project(&self, world: Vec3) -> Vec2 {
        Vec2::new(world.x * self.scale, world.z * self.scale)
    }

    fn marker_position(&self, registry: &EntityRegistry, live: &impl LiveTransforms, id: &EntityId) -> Option<Vec2> {
        let world = live
            .live_position(id)
            .or_else(|| registry.get(id).map(|e| e.world_position))?;
        Some(self.project(world))
    }

    /// Markers for every entity, in registry order.
    pub fn markers(
        &self,
        registry: &EntityRegistry,
        live: &impl LiveTransforms,
        state: &SelectionState,
    ) -> Vec<MinimapMarker> {
        registry
            .iter()
            .filter_map(|entity| {
                let at = self.marker_position(registry, live, &entity.id)?;
                Some(MinimapMarker {
                    id: entity.id.clone(),
                    name: entity.display_name.clone(),
                    x: at.x,
                    y: at.y,
                    color: entity.color.to_hex(),
                    selected: state.is_selected(&entity.id),
                    hovered: state.is_hovered(&entity.id),
                })
            })
            .collect()
    }

    /// Entity whose marker contains `offset`. The closest one wins on overlap.
    pub fn hit_test(
        &self,
        offset: Vec2,
        registry: &EntityRegistry,
        live: &impl LiveTransforms,
    ) -> Option<EntityId> {
        if !offset.is_finite() {
            return None;
        }
        registry
            .ids()
            .filter_map(|id| {
                let d = self.marker_position(registry, live, id)?.distance(offset);
                (d <= self.marker_radius).then_some((d, id))
            })
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, id)| id.clone())
    }
}
