use crate::ship::state::ShipState;

/// The screen that owns the ship across mode changes.
///
/// The game loop reports every effective change of the ship here. It never
/// calls back with an unchanged ship.
pub trait ShipHost {
    fn ship_changed(&mut self, ship: &ShipState);
}

/// Host that keeps every reported ship, oldest first.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub reports: Vec<ShipState>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&ShipState> {
        self.reports.last()
    }
}

impl ShipHost for RecordingHost {
    fn ship_changed(&mut self, ship: &ShipState) {
        self.reports.push(ship.clone());
    }
}
