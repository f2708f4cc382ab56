use std::sync::Arc;

use glam::{Mat4, Vec2};
use log::{info, warn};

use crate::api::config::SceneConfig;
use crate::api::context::FrameContext;
use crate::api::types::{index_or_none, EntityId, SceneEvent, SoundEvent};
use crate::core::clock::SceneClock;
use crate::core::registry::EntityRegistry;
use crate::core::selection::{SelectionController, SelectionEffect, SelectionState};
use crate::core::session::SessionContext;
use crate::input::adapters::{InputRouter, NavCommand, Picker};
use crate::input::queue::InputQueue;
use crate::overlay::banner::InfoBanner;
use crate::overlay::coordinator::OverlayCoordinator;
use crate::overlay::minimap::{Minimap, MinimapMarker};
use crate::overlay::surfaces::{ChatSurface, ContentSurface, ContentView};
use crate::renderer::camera::CameraRig;
use crate::renderer::instance::{OrbitBuffer, PlanetBuffer};
use crate::services::chat::ChatResponder;
use crate::services::visit::{SessionVisitLogger, VisitLogger};
use crate::systems::orbit::OrbitRenderer;
use crate::systems::picking::{pick, Ray};
use crate::systems::planet::PlanetNodes;
use crate::systems::render::build_planet_buffer;

/// External collaborators injected at mount.
pub struct Collaborators {
    pub content: Box<dyn ContentSurface>,
    pub chat: Box<dyn ChatSurface>,
    pub visits: Box<dyn VisitLogger>,
}

impl Collaborators {
    /// Surfaces with the session-only visit logger.
    pub fn new(content: Box<dyn ContentSurface>, chat: Box<dyn ChatSurface>) -> Self {
        Self {
            content,
            chat,
            visits: Box::new(SessionVisitLogger),
        }
    }

    pub fn with_visit_logger(mut self, visits: Box<dyn VisitLogger>) -> Self {
        self.visits = visits;
        self
    }
}

/// Resolves pointer and minimap positions against what was drawn last frame.
struct ScenePicker<'a> {
    inverse_view_proj: Mat4,
    nodes: &'a PlanetNodes,
    minimap: &'a Minimap,
    registry: &'a EntityRegistry,
    emphasis_scale: f32,
}

impl Picker for ScenePicker<'_> {
    fn pick(&self, ndc: Vec2) -> Option<EntityId> {
        let ray = Ray::from_ndc(ndc, self.inverse_view_proj)?;
        pick(&ray, self.nodes, self.emphasis_scale)
    }

    fn pick_minimap(&self, offset: Vec2) -> Option<EntityId> {
        self.minimap.hit_test(offset, self.registry, self.nodes)
    }
}

/// The mounted galaxy: registry, selection, animated nodes, camera and
/// overlays, advanced together once per tick.
///
/// Each tick applies queued input in arrival order, dispatches the
/// resulting side effects, then advances the nodes and finally the camera,
/// so the camera always frames the selection made this tick.
pub struct GalaxyScene {
    config: SceneConfig,
    registry: Arc<EntityRegistry>,
    selection: SelectionController,
    nodes: PlanetNodes,
    orbits: OrbitRenderer,
    camera: CameraRig,
    overlays: OverlayCoordinator,
    minimap: Minimap,
    router: InputRouter,
    session: SessionContext,
    visits: Box<dyn VisitLogger>,
    clock: SceneClock,
    commands: Vec<NavCommand>,
}

impl GalaxyScene {
    pub fn new(registry: EntityRegistry, config: SceneConfig, collaborators: Collaborators) -> Self {
        let registry = Arc::new(registry);
        info!("galaxy scene mounted with {} entities", registry.len());
        Self {
            selection: SelectionController::new(Arc::clone(&registry)),
            nodes: PlanetNodes::from_registry(&registry),
            orbits: OrbitRenderer::new(&registry, config.orbit_samples),
            camera: CameraRig::new(&config),
            overlays: OverlayCoordinator::new(Arc::clone(&registry), collaborators.content, collaborators.chat),
            minimap: Minimap::new(&config),
            router: InputRouter::new(&config),
            session: SessionContext::new(),
            visits: collaborators.visits,
            clock: SceneClock::new(),
            commands: Vec::with_capacity(16),
            registry,
            config,
        }
    }

    /// Advance one tick.
    pub fn update(&mut self, frame: &mut FrameContext, input: &InputQueue, dt: f32) {
        self.clock.advance(dt);

        let picker = ScenePicker {
            inverse_view_proj: self.camera.view_projection().inverse(),
            nodes: &self.nodes,
            minimap: &self.minimap,
            registry: &self.registry,
            emphasis_scale: self.config.emphasis_scale,
        };
        for event in input.iter() {
            self.router.route(*event, &picker, &mut self.commands);
        }

        let commands = std::mem::take(&mut self.commands);
        for command in &commands {
            self.command(command.clone(), frame);
        }
        // Keep the allocation for next tick.
        self.commands = commands;
        self.commands.clear();

        self.overlays.sync(self.selection.state(), frame);

        let state = self.selection.state();
        self.nodes.advance(self.clock.elapsed(), dt, state, self.config.emphasis_smoothing);
        self.camera.tick(state, &self.nodes, dt);

        frame.emit_event(SceneEvent::new(
            SceneEvent::SELECTION,
            index_or_none(state.selected.as_ref().and_then(|id| self.registry.index_of(id))),
            index_or_none(state.hovered.as_ref().and_then(|id| self.registry.index_of(id))),
            if state.is_focused_view() { 1.0 } else { 0.0 },
        ));
    }

    /// Apply one navigation command and dispatch its side effects.
    pub fn command(&mut self, command: NavCommand, frame: &mut FrameContext) {
        match command {
            NavCommand::Select(id) => self.selection.select(id.as_ref()),
            NavCommand::Toggle(id) => self.selection.toggle_selection(&id),
            NavCommand::Hover(id) => self.selection.hover(id.as_ref()),
            NavCommand::Next => self.selection.select_next(),
            NavCommand::Previous => self.selection.select_previous(),
            NavCommand::Reselect => self.selection.reselect(),
            NavCommand::DismissContent => self.overlays.dismiss_content(frame),
            NavCommand::DismissChat => self.overlays.dismiss_chat(frame),
            NavCommand::Zoom(factor) => self.camera.zoom_by(factor),
            NavCommand::Orbit(delta) => self.camera.orbit_by(delta),
            NavCommand::Pan(delta) => self.camera.pan_by(delta),
            NavCommand::Resize { width, height } => {
                self.camera.set_viewport(width, height);
                self.router.set_viewport(width, height);
            }
        }
        self.dispatch_effects(frame);
    }

    fn dispatch_effects(&mut self, frame: &mut FrameContext) {
        for effect in self.selection.drain_effects() {
            self.overlays.apply(&effect, frame);
            match effect {
                SelectionEffect::OpenContent(_) => frame.emit_sound(SoundEvent::SELECT),
                SelectionEffect::CloseContent => frame.emit_sound(SoundEvent::BACK),
                SelectionEffect::HoverChanged(hovered) => {
                    if hovered.is_some() {
                        frame.emit_sound(SoundEvent::HOVER);
                    }
                    let index = hovered.as_ref().and_then(|id| self.registry.index_of(id));
                    frame.emit_event(SceneEvent::new(SceneEvent::HOVER, index_or_none(index), 0.0, 0.0));
                }
                SelectionEffect::Visit(id) => self.log_visit(&id, frame),
                SelectionEffect::OpenChat(_) | SelectionEffect::CloseChat | SelectionEffect::Reselected(_) => {}
            }
        }
    }

    fn log_visit(&mut self, id: &EntityId, frame: &mut FrameContext) {
        if let Err(err) = self.visits.log_visit(id, &mut self.session) {
            warn!("visit logging failed: {}", err);
        }
        frame.emit_event(SceneEvent::new(
            SceneEvent::VISIT,
            index_or_none(self.registry.index_of(id)),
            self.session.visited().len() as f32,
            0.0,
        ));
        self.emit_badges(frame);
    }

    fn emit_badges(&mut self, frame: &mut FrameContext) {
        for badge in self.session.evaluate_badges(&self.registry) {
            frame.emit_event(SceneEvent::new(SceneEvent::BADGE, badge.code(), 0.0, 0.0));
        }
    }

    /// Answer a chat message with the focused entity as context.
    /// Responder failures are logged and yield `None`.
    pub fn send_chat(
        &mut self,
        message: &str,
        responder: &mut dyn ChatResponder,
        frame: &mut FrameContext,
    ) -> Option<String> {
        let context = self.selection.selected().cloned();
        let reply = match responder.respond(message, context.as_ref(), &mut self.session) {
            Ok(reply) => Some(reply),
            Err(err) => {
                warn!("chat reply failed: {}", err);
                None
            }
        };
        self.emit_badges(frame);
        reply
    }

    // ── Direct navigation API ───────────────────────────────────────────

    pub fn select(&mut self, id: Option<&EntityId>, frame: &mut FrameContext) {
        self.command(NavCommand::Select(id.cloned()), frame);
    }

    /// Set hover directly. The pointer's last hit is forgotten, so moving
    /// back over the same entity hovers it again.
    pub fn hover(&mut self, id: Option<&EntityId>, frame: &mut FrameContext) {
        self.router.forget_pointer_target();
        self.command(NavCommand::Hover(id.cloned()), frame);
    }

    pub fn toggle_selection(&mut self, id: &EntityId, frame: &mut FrameContext) {
        self.command(NavCommand::Toggle(id.clone()), frame);
    }

    /// Write this frame's planet instances and visible orbit paths.
    pub fn render(&self, planets: &mut PlanetBuffer, orbits: &mut OrbitBuffer) {
        let state = self.selection.state();
        build_planet_buffer(&self.registry, &self.nodes, state, self.config.emphasis_scale, planets);
        self.orbits.write_vertices(state, orbits);
    }

    /// Close all overlays. Call before dropping the scene.
    pub fn teardown(&mut self) {
        self.overlays.teardown();
        info!(
            "galaxy scene unmounted ({} of {} visited)",
            self.session.visited().len(),
            self.registry.len()
        );
    }

    // ── Read-only views ─────────────────────────────────────────────────

    pub fn state(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn nodes(&self) -> &PlanetNodes {
        &self.nodes
    }

    pub fn overlays(&self) -> &OverlayCoordinator {
        &self.overlays
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Model of the visible content surface, if any.
    pub fn content_view(&self) -> Option<ContentView> {
        let id = self.overlays.content_entity()?;
        self.registry.get(id).map(ContentView::from_entity)
    }

    pub fn banner(&self) -> InfoBanner {
        InfoBanner::for_state(self.selection.state(), &self.registry)
    }

    pub fn minimap_markers(&self) -> Vec<MinimapMarker> {
        self.minimap.markers(&self.registry, &self.nodes, self.selection.state())
    }
}
