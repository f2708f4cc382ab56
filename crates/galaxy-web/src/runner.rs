use std::rc::Rc;

use galaxy_nav::bridge::protocol::{
    HEADER_AUTO_ROTATING, HEADER_ELAPSED, HEADER_EVENT_COUNT, HEADER_FLOATS, HEADER_FRAME_COUNTER,
    HEADER_HOVERED, HEADER_LOCK, HEADER_MAX_EVENTS, HEADER_MAX_ORBIT_VERTICES, HEADER_MAX_PLANETS,
    HEADER_MAX_SOUNDS, HEADER_ORBIT_VERTEX_COUNT, HEADER_PLANET_COUNT, HEADER_PROTOCOL_VERSION,
    HEADER_SELECTED, HEADER_SOUND_COUNT, HEADER_VIEW_MODE, PROTOCOL_VERSION,
};
use galaxy_nav::overlay::nav_visible;
use galaxy_nav::{
    CameraUniform, ChatResponder, Collaborators, EntityId, FixedTimestep, FrameContext, GalaxyScene,
    InputEvent, InputQueue, KeywordResponder, OrbitBuffer, PlanetBuffer, ProtocolLayout, RegistryError,
    RegistryManifest, ViewMode,
};
use serde_json::json;

use crate::surfaces::{OutboxChatSurface, OutboxContentSurface, SharedOutbox};

/// Drives a `GalaxyScene` from the page's animation frame.
///
/// The demo crate keeps one of these in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]` (see `export_galaxy!`).
pub struct GalaxyRunner {
    scene: GalaxyScene,
    frame: FrameContext,
    /// Sounds and events emitted by direct calls between ticks.
    carry: FrameContext,
    input: InputQueue,
    idle: InputQueue,
    timestep: FixedTimestep,
    planets: PlanetBuffer,
    orbits: OrbitBuffer,
    camera: CameraUniform,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame_counter: u32,
    /// Flat buffer of sound event IDs for shared-buffer reads.
    sound_buffer: Vec<u8>,
    outbox: SharedOutbox,
    responder: Box<dyn ChatResponder>,
}

impl GalaxyRunner {
    /// Build a runner from a registry manifest.
    pub fn from_manifest(json: &str) -> Result<Self, RegistryError> {
        let (registry, config) = RegistryManifest::from_json(json)?.into_parts()?;
        let layout = ProtocolLayout::for_scene(registry.len(), &config);
        let outbox = SharedOutbox::default();
        let collaborators = Collaborators::new(
            Box::new(OutboxContentSurface(Rc::clone(&outbox))),
            Box::new(OutboxChatSurface(Rc::clone(&outbox))),
        );

        let frame = FrameContext::from_config(&config);
        let carry = FrameContext::from_config(&config);
        let timestep = FixedTimestep::new(config.fixed_dt);
        let sound_buffer = Vec::with_capacity(config.max_sounds);
        let responder = Box::new(KeywordResponder::for_registry(&registry));
        let scene = GalaxyScene::new(registry, config, collaborators);
        let camera = scene.camera().uniform();

        let mut runner = Self {
            scene,
            frame,
            carry,
            input: InputQueue::new(),
            idle: InputQueue::new(),
            timestep,
            planets: PlanetBuffer::new(),
            orbits: OrbitBuffer::new(),
            camera,
            layout,
            header: [0.0; HEADER_FLOATS],
            frame_counter: 0,
            sound_buffer,
            outbox,
            responder,
        };
        runner.scene.render(&mut runner.planets, &mut runner.orbits);
        runner.write_header();
        Ok(runner)
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed-step scene updates, then rebuild the shared buffers.
    ///
    /// Queued input is applied on the first fixed step only. When the frame
    /// was too short for a step, input stays queued for the next frame.
    pub fn tick(&mut self, dt: f32) {
        self.frame.clear_frame_data();
        for sound in self.carry.sounds.drain(..) {
            self.frame.emit_sound(sound);
        }
        for event in self.carry.events.drain(..) {
            self.frame.emit_event(event);
        }

        let steps = self.timestep.accumulate(dt);
        let step_dt = self.timestep.dt();
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.idle };
            self.scene.update(&mut self.frame, input, step_dt);
        }
        if steps > 0 {
            self.input.drain();
        }

        self.scene.render(&mut self.planets, &mut self.orbits);
        self.camera = self.scene.camera().uniform();

        self.sound_buffer.clear();
        for sound in &self.frame.sounds {
            self.sound_buffer.push(sound.0 as u8);
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.write_header();
    }

    fn write_header(&mut self) {
        let state = self.scene.state();
        let registry = self.scene.registry();
        let index = |id: Option<&EntityId>| {
            id.and_then(|id| registry.index_of(id)).map(|i| i as f32).unwrap_or(-1.0)
        };
        let selected = index(state.selected.as_ref());
        let hovered = index(state.hovered.as_ref());

        let h = &mut self.header;
        h[HEADER_LOCK] = 0.0;
        h[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        h[HEADER_MAX_PLANETS] = self.layout.max_planets as f32;
        h[HEADER_PLANET_COUNT] = self.planets.instance_count() as f32;
        h[HEADER_MAX_ORBIT_VERTICES] = self.layout.max_orbit_vertices as f32;
        h[HEADER_ORBIT_VERTEX_COUNT] = self.orbits.vertex_count() as f32;
        h[HEADER_MAX_SOUNDS] = self.layout.max_sounds as f32;
        h[HEADER_SOUND_COUNT] = self.sound_buffer.len() as f32;
        h[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        h[HEADER_EVENT_COUNT] = self.frame.events.len() as f32;
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[HEADER_SELECTED] = selected;
        h[HEADER_HOVERED] = hovered;
        h[HEADER_VIEW_MODE] = match self.scene.camera().mode() {
            ViewMode::Overview => 0.0,
            ViewMode::Focused => 1.0,
        };
        h[HEADER_ELAPSED] = self.scene.elapsed() as f32;
        h[HEADER_AUTO_ROTATING] = if self.scene.camera().is_auto_rotating() { 1.0 } else { 0.0 };
    }

    // ---- Direct navigation (UI buttons, featured-planet links) ----

    /// Select by id; an empty or unknown id returns to the overview.
    pub fn select(&mut self, id: &str) {
        let id = (!id.is_empty()).then(|| EntityId::new(id));
        self.scene.select(id.as_ref(), &mut self.carry);
    }

    pub fn hover(&mut self, id: &str) {
        let id = (!id.is_empty()).then(|| EntityId::new(id));
        self.scene.hover(id.as_ref(), &mut self.carry);
    }

    /// Replace the chat backend. The default answers from the keyword table.
    pub fn set_responder(&mut self, responder: Box<dyn ChatResponder>) {
        self.responder = responder;
    }

    /// Answer a chat message. Returns an empty string when the responder failed.
    pub fn chat_send(&mut self, message: &str) -> String {
        self.scene
            .send_chat(message, self.responder.as_mut(), &mut self.carry)
            .unwrap_or_default()
    }

    /// Close all overlays. The runner should be dropped afterwards.
    pub fn teardown(&mut self) {
        self.scene.teardown();
    }

    // ---- JSON views for the DOM overlays ----

    /// Overlay commands since the last call, as a JSON array.
    pub fn take_overlay_json(&mut self) -> String {
        match self.outbox.borrow_mut().take_json() {
            Ok(json) => json,
            Err(err) => {
                log::warn!("overlay serialization failed: {}", err);
                "[]".to_string()
            }
        }
    }

    /// The visible content modal, or `null`.
    pub fn content_json(&self) -> String {
        match self.scene.content_view().map(|view| view.to_json()) {
            Some(Ok(json)) => json,
            Some(Err(err)) => {
                log::warn!("content serialization failed: {}", err);
                "null".to_string()
            }
            None => "null".to_string(),
        }
    }

    /// Banner text plus `navVisible`, whether the site navigation bar shows.
    pub fn banner_json(&self) -> String {
        match serde_json::to_value(self.scene.banner()) {
            Ok(mut banner) => {
                banner["navVisible"] = nav_visible(self.scene.state()).into();
                banner.to_string()
            }
            Err(err) => {
                log::warn!("banner serialization failed: {}", err);
                "null".to_string()
            }
        }
    }

    pub fn minimap_json(&self) -> String {
        serde_json::to_string(&self.scene.minimap_markers()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Visited ids and unlocked badges.
    pub fn session_json(&self) -> String {
        let session = self.scene.session();
        let badges: Vec<_> = session
            .badges()
            .iter()
            .map(|b| json!({ "id": b.id(), "name": b.name(), "description": b.description() }))
            .collect();
        let visited: Vec<_> = session.visited().iter().map(EntityId::as_str).collect();
        json!({
            "visited": visited,
            "chatMessages": session.chat_messages(),
            "badges": badges,
        })
        .to_string()
    }

    pub fn scene(&self) -> &GalaxyScene {
        &self.scene
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn planets_ptr(&self) -> *const f32 {
        self.planets.instances_ptr()
    }

    pub fn planet_count(&self) -> u32 {
        self.planets.instance_count()
    }

    pub fn orbits_ptr(&self) -> *const f32 {
        self.orbits.vertices_ptr()
    }

    pub fn orbit_vertex_count(&self) -> u32 {
        self.orbits.vertex_count()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn scene_events_ptr(&self) -> *const f32 {
        self.frame.events.as_ptr() as *const f32
    }

    pub fn scene_events_len(&self) -> u32 {
        self.frame.events.len() as u32
    }

    // ---- Capacity accessors ----

    pub fn max_planets(&self) -> u32 {
        self.layout.max_planets as u32
    }

    pub fn max_orbit_vertices(&self) -> u32 {
        self.layout.max_orbit_vertices as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_nav::{CollaboratorError, FallbackResponder, SceneEvent, SessionContext, SoundEvent};
    use serde_json::Value;

    const MANIFEST: &str = r##"{
        "config": { "autoRotateSpeed": 0.0 },
        "planets": [
            { "id": "a", "name": "Alpha", "color": "#ffffff",
              "content": [{ "key": "overview", "type": "text", "text": "hi" }] },
            { "id": "b", "name": "Beta", "color": "#ff0000", "position": [8, 0, 0] },
            { "id": "ai", "name": "AI", "color": "#00ff00", "position": [-8, 0, 0], "type": "ai" }
        ]
    }"##;

    const DT: f32 = 1.0 / 60.0;
    const ARROW_RIGHT: u32 = 39;
    const ESCAPE: u32 = 27;

    fn runner() -> GalaxyRunner {
        GalaxyRunner::from_manifest(MANIFEST).unwrap()
    }

    fn overlay(runner: &mut GalaxyRunner) -> Vec<Value> {
        serde_json::from_str(&runner.take_overlay_json()).unwrap()
    }

    #[test]
    fn invalid_manifest_is_an_error() {
        assert!(GalaxyRunner::from_manifest("{}").is_err());
        assert!(GalaxyRunner::from_manifest(r##"{ "planets": [{ "id": "", "name": "x", "color": "#000000" }] }"##).is_err());
    }

    #[test]
    fn invalid_config_is_an_error() {
        let json = r##"{
            "config": { "fixedDt": -0.016 },
            "planets": [{ "id": "a", "name": "A", "color": "#ffffff" }]
        }"##;
        assert!(matches!(GalaxyRunner::from_manifest(json), Err(RegistryError::Config(_))));

        let json = r##"{
            "config": { "cameraSmoothing": 1.5 },
            "planets": [{ "id": "a", "name": "A", "color": "#ffffff" }]
        }"##;
        assert!(matches!(GalaxyRunner::from_manifest(json), Err(RegistryError::Config(_))));
    }

    #[test]
    fn initial_header_and_buffers() {
        let r = runner();
        assert_eq!(r.planet_count(), 3);
        assert_eq!(r.max_planets(), 3);
        assert_eq!(r.header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(r.header[HEADER_SELECTED], -1.0);
        assert_eq!(r.header[HEADER_VIEW_MODE], 0.0);
        assert_eq!(r.header[HEADER_PLANET_COUNT], 3.0);
    }

    #[test]
    fn key_input_selects_and_reports() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: ARROW_RIGHT });
        r.tick(DT);

        assert_eq!(r.scene().state().selected, Some("a".into()));
        assert_eq!(r.header[HEADER_SELECTED], 0.0);
        assert_eq!(r.header[HEADER_VIEW_MODE], 1.0);
        assert_eq!(r.sound_buffer, vec![SoundEvent::SELECT.0 as u8]);

        let commands = overlay(&mut r);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0]["type"], "openContent");
        assert_eq!(commands[0]["view"]["id"], "a");

        let content: Value = serde_json::from_str(&r.content_json()).unwrap();
        assert_eq!(content["title"], "Alpha");

        r.push_input(InputEvent::KeyDown { key_code: ESCAPE });
        r.tick(DT);
        assert_eq!(r.scene().state().selected, None);
        assert_eq!(overlay(&mut r)[0]["type"], "closeContent");
        assert_eq!(r.content_json(), "null");
    }

    #[test]
    fn input_is_applied_once_per_frame() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: ARROW_RIGHT });
        // Several fixed steps in one frame.
        r.tick(DT * 3.5);
        assert_eq!(r.scene().state().selected, Some("a".into()));
        assert!(r.input.is_empty());
    }

    #[test]
    fn input_waits_for_a_step() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: ARROW_RIGHT });
        r.tick(0.0);
        assert_eq!(r.scene().state().selected, None);
        assert_eq!(r.input.len(), 1);

        r.tick(DT);
        assert_eq!(r.scene().state().selected, Some("a".into()));
    }

    #[test]
    fn direct_select_events_reach_the_next_frame() {
        let mut r = runner();
        r.select("b");
        assert_eq!(r.scene().state().selected, Some("b".into()));

        r.tick(DT);
        assert!(r.frame.events_of(SceneEvent::CONTENT_OPEN).any(|e| e.a == 1.0));
        assert_eq!(r.sound_buffer, vec![SoundEvent::SELECT.0 as u8]);

        r.select("");
        assert_eq!(r.scene().state().selected, None);
    }

    #[test]
    fn chat_on_ai_planet() {
        let mut r = runner();
        r.select("ai");
        let commands = overlay(&mut r);
        assert!(commands.iter().any(|c| c["type"] == "openChat" && c["context"] == "ai"));

        let reply = r.chat_send("hello");
        assert!(!reply.is_empty());
        let session: Value = serde_json::from_str(&r.session_json()).unwrap();
        assert_eq!(session["chatMessages"], 1);
        assert_eq!(session["badges"][0]["id"], "ai-tinkerer");

        r.tick(DT);
        assert!(r.frame.events_of(SceneEvent::BADGE).any(|e| e.a == 2.0));
    }

    #[test]
    fn banner_and_minimap_json() {
        let mut r = runner();
        let banner: Value = serde_json::from_str(&r.banner_json()).unwrap();
        assert_eq!(banner["mode"], "overview");
        assert_eq!(banner["detail"], "Drag to rotate • Right-drag to pan • Scroll to zoom • Arrow keys to cycle planets");
        assert_eq!(banner["navVisible"], true);

        r.select("b");
        r.tick(DT);
        let banner: Value = serde_json::from_str(&r.banner_json()).unwrap();
        assert_eq!(banner["name"], "Beta");
        assert_eq!(banner["navVisible"], false);

        let markers: Vec<Value> = serde_json::from_str(&r.minimap_json()).unwrap();
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[1]["selected"], true);
    }

    struct Unreachable;

    impl ChatResponder for Unreachable {
        fn respond(
            &mut self,
            _message: &str,
            _context: Option<&EntityId>,
            _session: &mut SessionContext,
        ) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::ChatUnavailable("offline".into()))
        }
    }

    #[test]
    fn failing_backend_falls_back_to_keywords() {
        let mut r = runner();
        let keywords = KeywordResponder::for_registry(r.scene().registry());
        r.set_responder(Box::new(FallbackResponder::new(Unreachable, keywords)));
        r.select("ai");

        let reply = r.chat_send("hello");
        assert!(reply.starts_with("Hello there"));
        assert_eq!(r.chat_send("   "), "");

        // "frontend" is not a planet in this manifest.
        r.chat_send("frontend?");
        let session: Value = serde_json::from_str(&r.session_json()).unwrap();
        assert_eq!(session["chatMessages"], 2);
        assert_eq!(session["visited"], serde_json::json!(["ai"]));
    }

    #[test]
    fn teardown_closes_overlays() {
        let mut r = runner();
        r.select("ai");
        overlay(&mut r);
        r.teardown();
        let types: Vec<_> = overlay(&mut r).into_iter().map(|c| c["type"].clone()).collect();
        assert!(types.contains(&Value::from("closeContent")));
        assert!(types.contains(&Value::from("closeChat")));
    }
}
