use crate::core::registry::EntityRegistry;
use crate::core::selection::SelectionState;
use crate::renderer::instance::{PlanetBuffer, PlanetInstance};
use crate::systems::planet::PlanetNodes;

/// Build the planet buffer from the registry and its animated nodes.
/// Instances keep registry order, so instance `i` is registry entity `i`.
pub fn build_planet_buffer(
    registry: &EntityRegistry,
    nodes: &PlanetNodes,
    state: &SelectionState,
    emphasis_scale: f32,
    buffer: &mut PlanetBuffer,
) {
    buffer.clear();

    for (entity, node) in registry.iter().zip(nodes.iter()) {
        let position = node.position();
        let (ring_color, (ring_inner, ring_outer)) = match &entity.ring {
            Some(ring) => (ring.color.to_array(), ring.radii(entity.visual_size)),
            None => ([0.0; 3], (0.0, 0.0)),
        };
        let flag = |on: bool| if on { 1.0 } else { 0.0 };

        buffer.push(PlanetInstance {
            x: position.x,
            y: position.y,
            z: position.z,
            radius: node.render_radius(emphasis_scale),
            spin: node.spin(),
            emphasis: node.emphasis(),
            r: entity.color.r,
            g: entity.color.g,
            b: entity.color.b,
            ring_r: ring_color[0],
            ring_g: ring_color[1],
            ring_b: ring_color[2],
            ring_inner,
            ring_outer,
            selected: flag(state.is_selected(&entity.id)),
            hovered: flag(state.is_hovered(&entity.id)),
        });
    }
}
