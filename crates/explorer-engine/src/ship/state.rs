use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ship::class::{ShipSettings, ShipHandling};

/// Upper bound of every percentage gauge.
pub const GAUGE_MAX: f32 = 100.0;

/// Number of hull sections tracked for damage.
pub const HULL_SECTIONS: usize = 8;

/// Toggleable ship subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemKind {
    Shields,
    Warp,
    Engines,
    Reactor,
}

impl SystemKind {
    pub const ALL: [SystemKind; 4] = [
        SystemKind::Shields,
        SystemKind::Warp,
        SystemKind::Engines,
        SystemKind::Reactor,
    ];

    /// Case-insensitive lookup by name ("shields", "WARP", ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "shields" | "shld" => Some(Self::Shields),
            "warp" => Some(Self::Warp),
            "engines" | "eng" => Some(Self::Engines),
            "reactor" => Some(Self::Reactor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShipSystems {
    pub shields: bool,
    pub warp: bool,
    pub engines: bool,
    pub reactor: bool,
}

impl ShipSystems {
    pub fn is_on(&self, kind: SystemKind) -> bool {
        match kind {
            SystemKind::Shields => self.shields,
            SystemKind::Warp => self.warp,
            SystemKind::Engines => self.engines,
            SystemKind::Reactor => self.reactor,
        }
    }

    pub fn set(&mut self, kind: SystemKind, on: bool) {
        match kind {
            SystemKind::Shields => self.shields = on,
            SystemKind::Warp => self.warp = on,
            SystemKind::Engines => self.engines = on,
            SystemKind::Reactor => self.reactor = on,
        }
    }
}

/// Complete state of the pilot's ship.
///
/// Owned by the hosting screen; the game loop holds the authoritative copy
/// while piloting and reports every change back. The handling constants
/// (`max_speed`, `thrust_power`, `rotation_speed`) are fixed at launch and
/// only exposed through getters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipState {
    pub position: Vec2,
    /// World units per tick.
    pub velocity: Vec2,
    /// Heading in radians, unbounded.
    pub rotation: f32,

    pub hull: f32,
    pub shields: f32,
    pub fuel: f32,
    pub energy: f32,
    pub thrust: f32,
    pub cargo_weight: f32,

    pub systems: ShipSystems,
    /// Per-section damage flags. Written by collision logic outside the core.
    pub damage: [bool; HULL_SECTIONS],
    pub is_thrusting: bool,

    max_speed: f32,
    thrust_power: f32,
    rotation_speed: f32,
}

impl ShipState {
    /// Create a ship with the given handling constants and factory gauges.
    pub fn new(position: Vec2, handling: ShipHandling) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            hull: 100.0,
            shields: 85.0,
            fuel: 75.0,
            energy: 90.0,
            thrust: 50.0,
            cargo_weight: 25.0,
            systems: ShipSystems {
                shields: true,
                warp: false,
                engines: true,
                reactor: true,
            },
            damage: [false; HULL_SECTIONS],
            is_thrusting: false,
            max_speed: handling.max_speed,
            thrust_power: handling.thrust_power,
            rotation_speed: handling.rotation_speed,
        }
    }

    /// Create the ship the pilot configured in the setup wizard.
    pub fn launch(position: Vec2, settings: &ShipSettings) -> Self {
        Self::new(position, settings.ship_class.handling())
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn thrust_power(&self) -> f32 {
        self.thrust_power
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Unit vector along the current heading.
    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.rotation.cos(), self.rotation.sin())
    }

    /// Flip one subsystem on or off.
    pub fn toggle_system(&mut self, kind: SystemKind) {
        let on = self.systems.is_on(kind);
        self.systems.set(kind, !on);
    }

    /// Force every gauge into [0, 100]. NaN gauges read as empty.
    pub fn clamp_gauges(&mut self) {
        for gauge in [
            &mut self.hull,
            &mut self.shields,
            &mut self.fuel,
            &mut self.energy,
            &mut self.thrust,
            &mut self.cargo_weight,
        ] {
            *gauge = clamp_gauge(*gauge);
        }
    }

    /// Gauges in display order: hull, shields, fuel, energy, thrust, cargo.
    pub fn gauges(&self) -> [f32; 6] {
        [
            self.hull,
            self.shields,
            self.fuel,
            self.energy,
            self.thrust,
            self.cargo_weight,
        ]
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a ship handed back by the host. Gauges are clamped on the way in.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut ship: Self = serde_json::from_str(json)?;
        ship.clamp_gauges();
        Ok(ship)
    }
}

pub fn clamp_gauge(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, GAUGE_MAX)
    }
}
