use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Scene configuration. Every field has a default, so a manifest may
/// override only what it needs (or omit the `config` object entirely).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Camera position in overview mode.
    pub overview_position: [f32; 3],
    /// Look-at point in overview mode.
    pub overview_target: [f32; 3],
    /// Focused camera position = live entity position + this offset.
    pub focus_offset: [f32; 3],
    /// Fraction of the remaining distance the camera keeps per 60 Hz frame.
    /// 0.95 moves 5% of the way each frame.
    pub camera_smoothing: f32,
    /// Min/max camera distance from its look-at point in overview mode.
    pub overview_zoom: [f32; 2],
    /// Min/max camera distance while focused on an entity.
    pub focused_zoom: [f32; 2],
    /// Idle orbit speed; 1.0 = one full turn per minute.
    pub auto_rotate_speed: f32,
    /// Same semantics as `camera_smoothing`, for hover/select emphasis.
    pub emphasis_smoothing: f32,
    /// Scale boost at full emphasis (0.15 renders 1.15x).
    pub emphasis_scale: f32,
    /// Minimap pixels per world unit. Shared by drawing and hit-testing.
    pub minimap_scale: f32,
    /// Minimap marker hit radius in pixels.
    pub minimap_marker_radius: f32,
    /// Vertices per orbit path.
    pub orbit_samples: usize,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Pointer travel in pixels before a press becomes a drag.
    pub drag_threshold: f32,
    /// World units panned per right-dragged pixel.
    pub pan_speed: f32,
    /// Radians orbited per dragged pixel.
    pub orbit_speed: f32,
    /// Multiplicative zoom per wheel notch.
    pub zoom_step: f32,
    /// Maximum number of scene events per frame.
    pub max_events: usize,
    /// Maximum number of sound events per frame.
    pub max_sounds: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            overview_position: [0.0, 10.0, 25.0],
            overview_target: [0.0, 0.0, 0.0],
            focus_offset: [0.0, 2.0, 5.0],
            camera_smoothing: 0.95,
            overview_zoom: [3.0, 30.0],
            focused_zoom: [3.0, 15.0],
            auto_rotate_speed: 0.5,
            emphasis_smoothing: 0.85,
            emphasis_scale: 0.15,
            minimap_scale: 2.5,
            minimap_marker_radius: 8.0,
            orbit_samples: 128,
            fov_y_degrees: 50.0,
            near: 0.1,
            far: 1000.0,
            drag_threshold: 5.0,
            pan_speed: 0.05,
            orbit_speed: 0.005,
            zoom_step: 1.1,
            max_events: 64,
            max_sounds: 32,
        }
    }
}

impl SceneConfig {
    pub fn overview_position(&self) -> Vec3 {
        Vec3::from_array(self.overview_position)
    }

    pub fn overview_target(&self) -> Vec3 {
        Vec3::from_array(self.overview_target)
    }

    pub fn focus_offset(&self) -> Vec3 {
        Vec3::from_array(self.focus_offset)
    }

    /// Auto-rotate speed in radians per second.
    /// Matches the orbit-controls convention: speed 1.0 = one turn per 60 s.
    pub fn auto_rotate_rate(&self) -> f32 {
        std::f32::consts::TAU / 60.0 * self.auto_rotate_speed
    }

    /// Reject values the camera, clock or minimap cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(ConfigError::NotPositive { field: "fixedDt", value: self.fixed_dt });
        }
        for (field, value) in [
            ("cameraSmoothing", self.camera_smoothing),
            ("emphasisSmoothing", self.emphasis_smoothing),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(ConfigError::Smoothing { field, value });
            }
        }
        for (field, [min, max]) in [("overviewZoom", self.overview_zoom), ("focusedZoom", self.focused_zoom)] {
            if !(min.is_finite() && max.is_finite() && min >= 0.0 && max > 0.0 && min <= max) {
                return Err(ConfigError::ZoomRange { field, min, max });
            }
        }
        for (field, value) in [
            ("zoomStep", self.zoom_step),
            ("near", self.near),
            ("fovYDegrees", self.fov_y_degrees),
            ("minimapScale", self.minimap_scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(ConfigError::ClipPlanes { near: self.near, far: self.far });
        }
        if self.fov_y_degrees >= 180.0 {
            return Err(ConfigError::OutOfRange { field: "fovYDegrees", value: self.fov_y_degrees });
        }
        for (field, value) in [
            ("autoRotateSpeed", self.auto_rotate_speed),
            ("emphasisScale", self.emphasis_scale),
            ("minimapMarkerRadius", self.minimap_marker_radius),
            ("dragThreshold", self.drag_threshold),
            ("panSpeed", self.pan_speed),
            ("orbitSpeed", self.orbit_speed),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(field));
            }
        }
        for (field, vector) in [
            ("overviewPosition", self.overview_position),
            ("overviewTarget", self.overview_target),
            ("focusOffset", self.focus_offset),
        ] {
            if !Vec3::from_array(vector).is_finite() {
                return Err(ConfigError::NonFinite(field));
            }
        }
        Ok(())
    }
}
