pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod overlay;
pub mod services;

// Re-export key types at crate root for convenience
pub use api::config::SceneConfig;
pub use api::context::FrameContext;
pub use api::types::{EntityId, SceneEvent, SoundEvent};
pub use components::content::{ContentBody, ContentSection, EntityContent, TimelineItem};
pub use components::entity::{Entity, EntityKind};
pub use components::visual::{Color, RingDescriptor};
pub use crate::core::clock::{FixedTimestep, SceneClock};
pub use crate::core::error::{CollaboratorError, ConfigError, RegistryError};
pub use crate::core::registry::EntityRegistry;
pub use crate::core::scene::{Collaborators, GalaxyScene};
pub use crate::core::selection::{SelectionController, SelectionEffect, SelectionState};
pub use crate::core::session::{Badge, SessionContext};
pub use renderer::camera::{CameraGoal, CameraRig, CameraUniform, ViewMode};
pub use renderer::instance::{OrbitBuffer, OrbitVertex, PlanetBuffer, PlanetInstance};
pub use input::queue::{InputEvent, InputQueue};
pub use input::adapters::{InputRouter, NavCommand};
pub use input::keys::NavKey;
pub use assets::manifest::RegistryManifest;
pub use bridge::protocol::ProtocolLayout;
pub use systems::planet::{LiveTransforms, NodeEvent, PlanetNode, PlanetNodes};
pub use systems::orbit::OrbitRenderer;
pub use overlay::{ChatSurface, ContentSurface, ContentView, InfoBanner, Minimap, MinimapMarker, OverlayCoordinator};
pub use services::{ChatResponder, FallbackResponder, KeywordResponder, SessionVisitLogger, VisitLogger};

// Extensions: pure math helpers
pub use extensions::{damp, damp_factor, damp_vec3, lerp, lerp_vec3};
