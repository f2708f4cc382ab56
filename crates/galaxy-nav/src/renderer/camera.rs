use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3};
use log::{debug, warn};

use crate::api::config::SceneConfig;
use crate::core::selection::SelectionState;
use crate::extensions::damping::damp_vec3;
use crate::systems::planet::LiveTransforms;

/// Which framing the camera is working toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Overview,
    Focused,
}

/// Where the camera wants to be and what it wants to look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraGoal {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraGoal {
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.target.is_finite()
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// GPU-side uniform data for the camera.
/// 36 floats: view, projection, eye position, aspect.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub aspect: f32,
}

impl CameraUniform {
    pub const FLOATS: usize = 36;
}

/// Highest user orbit elevation above (or below) the look-at plane, radians.
pub const MAX_ORBIT_ELEVATION: f32 = 1.4;

/// Rotate `offset` around the origin by `yaw` (about world Y) and `pitch`
/// (elevation), keeping its length. Elevation is clamped to
/// ±`MAX_ORBIT_ELEVATION`.
pub fn orbit_offset(offset: Vec3, yaw: f32, pitch: f32) -> Vec3 {
    let radius = offset.length();
    if radius <= f32::EPSILON || (yaw == 0.0 && pitch == 0.0) {
        return offset;
    }
    let heading = offset.x.atan2(offset.z) + yaw;
    let elevation = (elevation_of(offset) + pitch).clamp(-MAX_ORBIT_ELEVATION, MAX_ORBIT_ELEVATION);
    Vec3::new(
        heading.sin() * elevation.cos(),
        elevation.sin(),
        heading.cos() * elevation.cos(),
    ) * radius
}

fn elevation_of(offset: Vec3) -> f32 {
    offset.y.atan2(Vec2::new(offset.x, offset.z).length())
}

/// User input received since the last tick. Applied after the view mode
/// for that tick is known, so it is clamped against the right bounds.
#[derive(Debug, Clone, Copy)]
struct PendingInput {
    zoom: f32,
    orbit: Vec2,
    pan: Vec2,
}

impl Default for PendingInput {
    fn default() -> Self {
        Self { zoom: 1.0, orbit: Vec2::ZERO, pan: Vec2::ZERO }
    }
}

/// Perspective camera that eases toward a goal derived from the selection.
///
/// Overview: a fixed vantage point, slowly auto-rotating while idle, with
/// user orbit, pan and zoom. Focused: trails the selected entity's live
/// position at a fixed offset the user can orbit and zoom; pan is off and
/// zoom has tighter bounds. Orbit and zoom reset on every mode change.
pub struct CameraRig {
    position: Vec3,
    target: Vec3,
    goal: CameraGoal,
    mode: ViewMode,
    auto_rotating: bool,
    /// Accumulated auto-rotate angle around the world Y axis.
    azimuth: f32,
    /// User zoom multiplier on the base offset.
    zoom: f32,
    /// User pan offset of the overview look-at point.
    pan: Vec3,
    /// User orbit around the look-at point: x = yaw, y = pitch (radians).
    orbit: Vec2,
    pending: PendingInput,

    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    smoothing: f32,
    overview_position: Vec3,
    overview_target: Vec3,
    focus_offset: Vec3,
    overview_zoom: [f32; 2],
    focused_zoom: [f32; 2],
    auto_rotate_rate: f32,
    pan_speed: f32,
    orbit_speed: f32,
}

impl CameraRig {
    pub fn new(config: &SceneConfig) -> Self {
        let goal = CameraGoal {
            position: config.overview_position(),
            target: config.overview_target(),
        };
        Self {
            position: goal.position,
            target: goal.target,
            goal,
            mode: ViewMode::Overview,
            auto_rotating: false,
            azimuth: 0.0,
            zoom: 1.0,
            pan: Vec3::ZERO,
            orbit: Vec2::ZERO,
            pending: PendingInput::default(),
            fov_y: config.fov_y_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: config.near,
            far: config.far,
            smoothing: config.camera_smoothing,
            overview_position: config.overview_position(),
            overview_target: config.overview_target(),
            focus_offset: config.focus_offset(),
            overview_zoom: config.overview_zoom,
            focused_zoom: config.focused_zoom,
            auto_rotate_rate: config.auto_rotate_rate(),
            pan_speed: config.pan_speed,
            orbit_speed: config.orbit_speed,
        }
    }

    /// Advance one tick: derive the goal from the selection and the live
    /// transforms, then ease position and look-at toward it.
    pub fn tick(&mut self, state: &SelectionState, live: &impl LiveTransforms, dt: f32) {
        let focus = state.selected.as_ref().and_then(|id| live.live_position(id));
        let mode = if focus.is_some() { ViewMode::Focused } else { ViewMode::Overview };
        if mode != self.mode {
            debug!("camera: {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.zoom = 1.0;
            self.orbit = Vec2::ZERO;
            if mode == ViewMode::Focused {
                self.pan = Vec3::ZERO;
            }
        }
        self.apply_pending();

        self.auto_rotating = mode == ViewMode::Overview
            && state.selected.is_none()
            && state.hovered.is_none()
            && self.auto_rotate_rate != 0.0;
        if self.auto_rotating && dt > 0.0 {
            self.azimuth = (self.azimuth + self.auto_rotate_rate * dt).rem_euclid(std::f32::consts::TAU);
        }

        let goal = match focus {
            Some(live_position) => self.focused_goal(live_position),
            None => self.overview_goal(),
        };
        if goal.is_finite() {
            self.goal = goal;
        } else {
            warn!("camera: non-finite goal {:?}, keeping previous", goal);
        }

        self.position = damp_vec3(self.position, self.goal.position, self.smoothing, dt);
        self.target = damp_vec3(self.target, self.goal.target, self.smoothing, dt);
    }

    fn overview_goal(&self) -> CameraGoal {
        let rotation = Quat::from_rotation_y(self.azimuth);
        let base = rotation * (self.overview_position - self.overview_target);
        let offset = orbit_offset(base, self.orbit.x, self.orbit.y) * self.zoom;
        let [min, max] = self.overview_zoom;
        let target = self.overview_target + self.pan;
        CameraGoal {
            position: target + offset.clamp_length(min, max),
            target,
        }
    }

    fn focused_goal(&self, live_position: Vec3) -> CameraGoal {
        let [min, max] = self.focused_zoom;
        CameraGoal {
            position: live_position
                + (orbit_offset(self.focus_offset, self.orbit.x, self.orbit.y) * self.zoom).clamp_length(min, max),
            target: live_position,
        }
    }

    fn base_offset(&self) -> Vec3 {
        match self.mode {
            ViewMode::Overview => self.overview_position - self.overview_target,
            ViewMode::Focused => self.focus_offset,
        }
    }

    fn zoom_bounds(&self) -> [f32; 2] {
        match self.mode {
            ViewMode::Overview => self.overview_zoom,
            ViewMode::Focused => self.focused_zoom,
        }
    }

    /// Scale the viewing distance by `factor` (>1 moves away). Takes effect
    /// on the next tick, clamped to that tick's mode bounds.
    pub fn zoom_by(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.pending.zoom *= factor;
        }
    }

    /// Orbit around the look-at point by a dragged screen delta in pixels.
    /// Takes effect on the next tick.
    pub fn orbit_by(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.pending.orbit += delta;
        }
    }

    /// Pan the overview look-at point by a dragged screen delta in pixels.
    /// Takes effect on the next tick; dropped while focused.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.pending.pan += delta;
        }
    }

    fn apply_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);

        let base = self.base_offset();
        let base_distance = base.length();
        if base_distance > f32::EPSILON {
            let [min, max] = self.zoom_bounds();
            self.zoom = (self.zoom * pending.zoom).clamp(min / base_distance, max / base_distance);
        }

        // Drag right swings the camera left, drag down raises it.
        let yaw = self.orbit.x - pending.orbit.x * self.orbit_speed;
        let base_elevation = elevation_of(base);
        let pitch = (self.orbit.y + pending.orbit.y * self.orbit_speed).clamp(
            -MAX_ORBIT_ELEVATION - base_elevation,
            MAX_ORBIT_ELEVATION - base_elevation,
        );
        self.orbit = Vec2::new(yaw.rem_euclid(std::f32::consts::TAU), pitch);

        if self.mode == ViewMode::Overview && pending.pan != Vec2::ZERO {
            let rotation = Quat::from_rotation_y(self.azimuth + self.orbit.x);
            let right = rotation * Vec3::X;
            let forward = rotation * Vec3::NEG_Z;
            let moved = self.pan + (right * -pending.pan.x + forward * pending.pan.y) * self.pan_speed;
            self.pan = moved.clamp_length_max(self.overview_zoom[1]);
        }
    }

    /// Update aspect ratio on canvas resize.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Perspective projection, depth in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            position: self.position.to_array(),
            aspect: self.aspect,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Last valid goal.
    pub fn goal(&self) -> CameraGoal {
        self.goal
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Distance from the camera to its goal.
    pub fn distance_to_goal(&self) -> f32 {
        self.position.distance(self.goal.position) + self.target.distance(self.goal.target)
    }

    /// Current eye-to-look-at distance.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotating
    }

    pub fn pan_offset(&self) -> Vec3 {
        self.pan
    }

    /// User orbit (yaw, pitch) in radians.
    pub fn orbit(&self) -> Vec2 {
        self.orbit
    }
}
