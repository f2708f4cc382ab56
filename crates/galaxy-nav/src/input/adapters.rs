use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::api::types::EntityId;
use crate::input::keys::NavKey;
use crate::input::queue::InputEvent;
use crate::systems::planet::NodeEvent;

/// A normalised navigation request. Every input source ends up here, and
/// every selection change goes through `select`, `hover` or `toggle_selection`.
#[derive(Debug, Clone, PartialEq)]
pub enum NavCommand {
    Select(Option<EntityId>),
    Toggle(EntityId),
    Hover(Option<EntityId>),
    Next,
    Previous,
    Reselect,
    DismissContent,
    DismissChat,
    /// Multiply the viewing distance.
    Zoom(f32),
    /// Primary-button drag: screen delta in pixels.
    Orbit(Vec2),
    /// Secondary-button drag: screen delta in pixels.
    Pan(Vec2),
    Resize { width: f32, height: f32 },
}

impl NavCommand {
    pub fn from_node_event(event: NodeEvent) -> Self {
        match event {
            NodeEvent::PointerEnter(id) => NavCommand::Hover(Some(id)),
            NodeEvent::PointerLeave(_) => NavCommand::Hover(None),
            NodeEvent::Click(id) => NavCommand::Toggle(id),
        }
    }

    pub fn from_key(key: NavKey) -> Self {
        match key {
            NavKey::ArrowRight => NavCommand::Next,
            NavKey::ArrowLeft => NavCommand::Previous,
            NavKey::Escape => NavCommand::Select(None),
            NavKey::Enter => NavCommand::Reselect,
        }
    }
}

/// Resolves screen positions to entities.
pub trait Picker {
    /// Entity under a point in normalized device coordinates.
    fn pick(&self, ndc: Vec2) -> Option<EntityId>;
    /// Entity whose minimap marker contains `offset` (pixels from the minimap centre).
    fn pick_minimap(&self, offset: Vec2) -> Option<EntityId>;
}

#[derive(Debug, Clone, Copy)]
struct Press {
    start: Vec2,
    last: Vec2,
    dragging: bool,
    /// Secondary button: drags pan and release never clicks.
    secondary: bool,
}

/// Turns raw pointer, wheel, keyboard and minimap input into [`NavCommand`]s.
///
/// Pointer hits become node enter/leave/click events first, so a 3D click
/// and a minimap click reach the controller the same way. A press that moves
/// past the drag threshold orbits (primary button) or pans (secondary)
/// instead of clicking.
pub struct InputRouter {
    viewport: Vec2,
    press: Option<Press>,
    under_pointer: Option<EntityId>,
    drag_threshold: f32,
    zoom_step: f32,
}

impl InputRouter {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            viewport: Vec2::new(1280.0, 720.0),
            press: None,
            under_pointer: None,
            drag_threshold: config.drag_threshold,
            zoom_step: config.zoom_step,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    /// Canvas pixels (origin top-left, y down) to NDC (y up).
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x / self.viewport.x * 2.0 - 1.0, 1.0 - y / self.viewport.y * 2.0)
    }

    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.dragging)
    }

    /// Forget which entity the pointer was last over. Call when hover is set
    /// from outside the router, so the next move re-reports what it hits.
    pub fn forget_pointer_target(&mut self) {
        self.under_pointer = None;
    }

    /// Route one event, appending the resulting commands to `out`.
    pub fn route(&mut self, event: InputEvent, picker: &impl Picker, out: &mut Vec<NavCommand>) {
        match event {
            InputEvent::PointerMove { x, y } => {
                let at = Vec2::new(x, y);
                if let Some(press) = self.press.as_mut() {
                    if !press.dragging && press.start.distance(at) > self.drag_threshold {
                        press.dragging = true;
                    }
                    if press.dragging {
                        let delta = at - press.last;
                        out.push(if press.secondary { NavCommand::Pan(delta) } else { NavCommand::Orbit(delta) });
                    }
                    press.last = at;
                }
                self.update_hover(picker.pick(self.to_ndc(x, y)), out);
            }
            InputEvent::PointerDown { x, y, button } => {
                let at = Vec2::new(x, y);
                let secondary = button == InputEvent::SECONDARY_BUTTON;
                self.press = Some(Press { start: at, last: at, dragging: false, secondary });
                self.update_hover(picker.pick(self.to_ndc(x, y)), out);
            }
            InputEvent::PointerUp { x, y } => {
                let Some(press) = self.press.take() else {
                    return;
                };
                if !press.dragging && !press.secondary {
                    // Empty space does nothing.
                    if let Some(id) = picker.pick(self.to_ndc(x, y)) {
                        out.push(NavCommand::from_node_event(NodeEvent::Click(id)));
                    }
                }
            }
            InputEvent::PointerLeave => {
                self.press = None;
                self.update_hover(None, out);
            }
            InputEvent::Wheel { delta } => {
                if delta > 0.0 {
                    out.push(NavCommand::Zoom(self.zoom_step));
                } else if delta < 0.0 {
                    out.push(NavCommand::Zoom(1.0 / self.zoom_step));
                }
            }
            InputEvent::KeyDown { key_code } => {
                if let Some(key) = NavKey::from_key_code(key_code) {
                    out.push(NavCommand::from_key(key));
                }
            }
            InputEvent::MinimapClick { x, y } => {
                if let Some(id) = picker.pick_minimap(Vec2::new(x, y)) {
                    out.push(NavCommand::Toggle(id));
                }
            }
            InputEvent::Resize { width, height } => {
                self.set_viewport(width, height);
                out.push(NavCommand::Resize { width, height });
            }
            InputEvent::DismissContent => out.push(NavCommand::DismissContent),
            InputEvent::DismissChat => out.push(NavCommand::DismissChat),
        }
    }

    fn update_hover(&mut self, hit: Option<EntityId>, out: &mut Vec<NavCommand>) {
        if hit == self.under_pointer {
            return;
        }
        if let Some(previous) = self.under_pointer.take() {
            out.push(NavCommand::from_node_event(NodeEvent::PointerLeave(previous)));
        }
        if let Some(id) = hit {
            self.under_pointer = Some(id.clone());
            out.push(NavCommand::from_node_event(NodeEvent::PointerEnter(id)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left half of the canvas is planet "a"; minimap hits "m" near the centre.
    struct HalfPicker;

    impl Picker for HalfPicker {
        fn pick(&self, ndc: Vec2) -> Option<EntityId> {
            (ndc.x < 0.0).then(|| EntityId::from("a"))
        }

        fn pick_minimap(&self, offset: Vec2) -> Option<EntityId> {
            (offset.length() < 5.0).then(|| EntityId::from("m"))
        }
    }

    fn router() -> InputRouter {
        let mut r = InputRouter::new(&SceneConfig::default());
        r.set_viewport(200.0, 100.0);
        r
    }

    fn down(x: f32, y: f32, button: u32) -> InputEvent {
        InputEvent::PointerDown { x, y, button }
    }

    fn route_all(r: &mut InputRouter, events: &[InputEvent]) -> Vec<NavCommand> {
        let mut out = Vec::new();
        for e in events {
            r.route(*e, &HalfPicker, &mut out);
        }
        out
    }

    #[test]
    fn ndc_conversion() {
        let r = router();
        assert_eq!(r.to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(r.to_ndc(200.0, 100.0), Vec2::new(1.0, -1.0));
        assert_eq!(r.to_ndc(100.0, 50.0), Vec2::ZERO);
    }

    #[test]
    fn hover_enter_and_leave() {
        let mut r = router();
        let out = route_all(
            &mut r,
            &[
                InputEvent::PointerMove { x: 10.0, y: 50.0 },
                InputEvent::PointerMove { x: 20.0, y: 50.0 },
                InputEvent::PointerMove { x: 150.0, y: 50.0 },
            ],
        );
        assert_eq!(out, vec![NavCommand::Hover(Some("a".into())), NavCommand::Hover(None)]);
    }

    #[test]
    fn click_toggles_hit_entity() {
        let mut r = router();
        let out = route_all(
            &mut r,
            &[down(10.0, 50.0, InputEvent::PRIMARY_BUTTON), InputEvent::PointerUp { x: 11.0, y: 50.0 }],
        );
        assert_eq!(out.last(), Some(&NavCommand::Toggle("a".into())));
    }

    #[test]
    fn secondary_click_does_not_select() {
        let mut r = router();
        let out = route_all(
            &mut r,
            &[down(10.0, 50.0, InputEvent::SECONDARY_BUTTON), InputEvent::PointerUp { x: 10.0, y: 50.0 }],
        );
        assert_eq!(out, vec![NavCommand::Hover(Some("a".into()))]);
    }

    #[test]
    fn click_on_empty_space_does_nothing() {
        let mut r = router();
        let out = route_all(
            &mut r,
            &[down(150.0, 50.0, InputEvent::PRIMARY_BUTTON), InputEvent::PointerUp { x: 150.0, y: 50.0 }],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn primary_drag_orbits_instead_of_clicking() {
        let mut r = router();
        let out = route_all(
            &mut r,
            &[
                down(150.0, 50.0, InputEvent::PRIMARY_BUTTON),
                InputEvent::PointerMove { x: 170.0, y: 50.0 },
                InputEvent::PointerMove { x: 180.0, y: 60.0 },
                InputEvent::PointerUp { x: 180.0, y: 60.0 },
            ],
        );
        assert_eq!(
            out,
            vec![NavCommand::Orbit(Vec2::new(20.0, 0.0)), NavCommand::Orbit(Vec2::new(10.0, 10.0))]
        );
        assert!(!r.is_dragging());
    }

    #[test]
    fn secondary_drag_pans() {
        let mut r = router();
        let out = route_all(
            &mut r,
            &[
                down(150.0, 50.0, InputEvent::SECONDARY_BUTTON),
                InputEvent::PointerMove { x: 170.0, y: 50.0 },
                InputEvent::PointerMove { x: 180.0, y: 60.0 },
                InputEvent::PointerUp { x: 180.0, y: 60.0 },
            ],
        );
        assert_eq!(
            out,
            vec![NavCommand::Pan(Vec2::new(20.0, 0.0)), NavCommand::Pan(Vec2::new(10.0, 10.0))]
        );
        assert!(!r.is_dragging());
    }

    #[test]
    fn forgotten_target_is_reported_again() {
        let mut r = router();
        let out = route_all(&mut r, &[InputEvent::PointerMove { x: 10.0, y: 50.0 }]);
        assert_eq!(out, vec![NavCommand::Hover(Some("a".into()))]);

        r.forget_pointer_target();
        let out = route_all(&mut r, &[InputEvent::PointerMove { x: 12.0, y: 50.0 }]);
        assert_eq!(out, vec![NavCommand::Hover(Some("a".into()))]);
    }

    #[test]
    fn keys_map_to_navigation() {
        let mut r = router();
        let out = route_all(
            &mut r,
            &[
                InputEvent::KeyDown { key_code: 39 },
                InputEvent::KeyDown { key_code: 37 },
                InputEvent::KeyDown { key_code: 27 },
                InputEvent::KeyDown { key_code: 13 },
                InputEvent::KeyDown { key_code: 65 },
            ],
        );
        assert_eq!(
            out,
            vec![NavCommand::Next, NavCommand::Previous, NavCommand::Select(None), NavCommand::Reselect]
        );
    }

    #[test]
    fn minimap_click_toggles_like_a_3d_click() {
        let mut r = router();
        let out = route_all(
            &mut r,
            &[InputEvent::MinimapClick { x: 1.0, y: 1.0 }, InputEvent::MinimapClick { x: 50.0, y: 0.0 }],
        );
        assert_eq!(out, vec![NavCommand::Toggle("m".into())]);
    }

    #[test]
    fn wheel_zooms_by_step() {
        let mut r = router();
        let out = route_all(
            &mut r,
            &[InputEvent::Wheel { delta: 3.0 }, InputEvent::Wheel { delta: -1.0 }, InputEvent::Wheel { delta: 0.0 }],
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], NavCommand::Zoom(1.1));
        assert!(matches!(out[1], NavCommand::Zoom(f) if (f - 1.0 / 1.1).abs() < 1e-6));
    }
}
