use serde::{Deserialize, Serialize};

/// Read-only handling constants of a ship class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipHandling {
    /// Speed cap in world units per tick.
    pub max_speed: f32,
    /// Velocity added by one forward impulse.
    pub thrust_power: f32,
    /// Radians turned by one rotation step.
    pub rotation_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipClass {
    /// Balanced hull for long hauls.
    #[default]
    Explorer,
    /// Big cargo hold, sluggish handling.
    Trader,
    /// Fast and agile.
    Fighter,
}

impl ShipClass {
    pub fn handling(self) -> ShipHandling {
        match self {
            ShipClass::Explorer => ShipHandling {
                max_speed: 8.0,
                thrust_power: 0.3,
                rotation_speed: 0.05,
            },
            ShipClass::Trader => ShipHandling {
                max_speed: 6.0,
                thrust_power: 0.25,
                rotation_speed: 0.04,
            },
            ShipClass::Fighter => ShipHandling {
                max_speed: 10.0,
                thrust_power: 0.35,
                rotation_speed: 0.07,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalaxySize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// The record the setup wizard hands over when the pilot launches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSettings {
    pub pilot_name: String,
    pub ship_class: ShipClass,
    pub galaxy_size: GalaxySize,
    pub difficulty: Difficulty,
}

impl ShipSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
