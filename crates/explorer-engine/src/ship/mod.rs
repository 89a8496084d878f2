pub mod class;
pub mod state;

pub use class::{Difficulty, GalaxySize, ShipClass, ShipSettings, ShipHandling};
pub use state::{ShipState, ShipSystems, SystemKind, GAUGE_MAX, HULL_SECTIONS};
