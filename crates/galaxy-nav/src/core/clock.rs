use log::warn;

/// Step used when a caller passes a timestep that cannot advance time.
pub const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;

/// Fixed timestep accumulator.
/// Keeps orbit and camera animation on a consistent step regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    /// A non-finite or non-positive `dt` falls back to `DEFAULT_FIXED_DT`.
    pub fn new(dt: f32) -> Self {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            warn!("clock: invalid fixed timestep {}, using {}", dt, DEFAULT_FIXED_DT);
            DEFAULT_FIXED_DT
        };
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    /// Negative or non-finite frame times (tab wake-ups, clock skew) add nothing.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Scene time since mount. Orbit phases are derived from it, so node
/// positions depend only on elapsed time, never on tick history.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneClock {
    elapsed: f64,
}

impl SceneClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt as f64;
        }
    }

    /// Elapsed seconds since mount.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
