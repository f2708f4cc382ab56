/// Shared buffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Planets: max_planets × 16 floats]
/// [Orbits: max_orbit_vertices × 8 floats]
/// [Camera: 36 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::config::SceneConfig;
use crate::api::types::SceneEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{OrbitVertex, PlanetInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_PLANETS: usize = 2;
pub const HEADER_PLANET_COUNT: usize = 3;
pub const HEADER_MAX_ORBIT_VERTICES: usize = 4;
pub const HEADER_ORBIT_VERTEX_COUNT: usize = 5;
pub const HEADER_MAX_SOUNDS: usize = 6;
pub const HEADER_SOUND_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_PROTOCOL_VERSION: usize = 10;
pub const HEADER_SELECTED: usize = 11;
pub const HEADER_HOVERED: usize = 12;
pub const HEADER_VIEW_MODE: usize = 13;
pub const HEADER_ELAPSED: usize = 14;
pub const HEADER_AUTO_ROTATING: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per planet instance (wire format, never changes).
pub const PLANET_FLOATS: usize = PlanetInstance::FLOATS;

/// Floats per orbit vertex: x, y, z, r, g, b, a, path (wire format, never changes).
pub const ORBIT_VERTEX_FLOATS: usize = OrbitVertex::FLOATS;

/// Floats in the camera block: view, projection, eye, aspect.
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per scene event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = SceneEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_planets: usize,
    pub max_orbit_vertices: usize,
    /// Maximum sound events per frame.
    pub max_sounds: usize,
    /// Maximum scene events per frame.
    pub max_events: usize,

    pub planet_data_floats: usize,
    pub orbit_data_floats: usize,
    pub sound_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where planet data begins.
    pub planet_data_offset: usize,
    pub orbit_data_offset: usize,
    pub camera_data_offset: usize,
    pub sound_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_planets: usize, max_orbit_vertices: usize, max_sounds: usize, max_events: usize) -> Self {
        let planet_data_floats = max_planets * PLANET_FLOATS;
        let orbit_data_floats = max_orbit_vertices * ORBIT_VERTEX_FLOATS;
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let planet_data_offset = HEADER_FLOATS;
        let orbit_data_offset = planet_data_offset + planet_data_floats;
        let camera_data_offset = orbit_data_offset + orbit_data_floats;
        let sound_data_offset = camera_data_offset + CAMERA_FLOATS;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_planets,
            max_orbit_vertices,
            max_sounds,
            max_events,
            planet_data_floats,
            orbit_data_floats,
            sound_data_floats,
            event_data_floats,
            planet_data_offset,
            orbit_data_offset,
            camera_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Layout for a registry of `planet_count` entities. Every planet may
    /// show its closed orbit path (`orbit_samples + 1` vertices).
    pub fn for_scene(planet_count: usize, config: &SceneConfig) -> Self {
        Self::new(
            planet_count,
            planet_count * (config.orbit_samples.max(3) + 1),
            config.max_sounds,
            config.max_events,
        )
    }
}
