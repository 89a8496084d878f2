use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How held thrust/rotation keys turn into motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrustMode {
    /// Every key-down event (including OS auto-repeat) applies one impulse
    /// or rotation step immediately.
    #[default]
    PerKeyEvent,
    /// Key-down only marks the control as held; each physics tick applies
    /// one impulse or rotation step per held control before integrating.
    PerTick,
}

/// Runtime tuning for the flight core, provided by the host.
///
/// Every field has a default, so a host may send a partial JSON object
/// (or none at all).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Period of the physics schedule in milliseconds (default: 16).
    pub physics_interval_ms: f64,
    /// Period of the energy schedule in milliseconds (default: 100).
    pub energy_interval_ms: f64,
    /// Nominal display-refresh period used when the loop is driven headless.
    pub frame_interval_ms: f64,
    /// Maximum ticks a single timer callback may catch up on.
    pub max_catch_up_ticks: u32,
    /// Per-tick velocity multiplier (default: 0.99).
    pub friction: f32,
    /// Camera easing weight in (0, 1) (default: 0.1).
    pub camera_smoothing: f32,
    /// Fraction of the camera offset the background follows (default: 0.2).
    pub background_parallax: f32,
    /// Rendered ship sprite edge length in pixels.
    pub ship_size: f32,
    /// Length of the thrust trail behind the sprite.
    pub trail_length: f32,
    /// Width of the thrust trail where it leaves the hull.
    pub trail_width: f32,
    pub thrust_mode: ThrustMode,
    /// Initial capacity of the sprite instance buffer.
    pub max_instances: usize,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            physics_interval_ms: 16.0,
            energy_interval_ms: 100.0,
            frame_interval_ms: 1000.0 / 60.0,
            max_catch_up_ticks: 10,
            friction: 0.99,
            camera_smoothing: 0.1,
            background_parallax: 0.2,
            ship_size: 40.0,
            trail_length: 20.0,
            trail_width: 8.0,
            thrust_mode: ThrustMode::PerKeyEvent,
            max_instances: 64,
        }
    }
}

impl FlightConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Pull out-of-range tunables back into their usable ranges.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        if !(self.physics_interval_ms > 0.0) {
            self.physics_interval_ms = defaults.physics_interval_ms;
        }
        if !(self.energy_interval_ms > 0.0) {
            self.energy_interval_ms = defaults.energy_interval_ms;
        }
        if !(self.frame_interval_ms > 0.0) {
            self.frame_interval_ms = defaults.frame_interval_ms;
        }
        self.max_catch_up_ticks = self.max_catch_up_ticks.max(1);
        self.friction = self.friction.clamp(0.0, 1.0);
        self.camera_smoothing = self.camera_smoothing.clamp(0.001, 0.999);
        self.background_parallax = self.background_parallax.clamp(0.0, 1.0);
        self.ship_size = self.ship_size.max(1.0);
        self.trail_length = self.trail_length.max(0.0);
        self.trail_width = self.trail_width.max(0.0);
    }
}
