use crate::ship::state::ShipState;

/// The single authoritative copy of the ship while piloting.
///
/// Every schedule and the input path mutate the ship only through
/// [`ShipCell::apply`], so writes are serialized and last-write-wins.
/// Each effective change bumps a revision; the owner flushes pending
/// revisions to the screen host.
#[derive(Debug, Default)]
pub struct ShipCell {
    ship: Option<ShipState>,
    revision: u64,
    reported: u64,
}

impl ShipCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a ship. Counts as a change.
    pub fn load(&mut self, mut ship: ShipState) {
        ship.clamp_gauges();
        self.ship = Some(ship);
        self.revision += 1;
    }

    /// Remove and return the ship, discarding any unreported change.
    pub fn take(&mut self) -> Option<ShipState> {
        self.reported = self.revision;
        self.ship.take()
    }

    pub fn get(&self) -> Option<&ShipState> {
        self.ship.as_ref()
    }

    /// Run a delta against the ship. Gauges are clamped afterwards.
    ///
    /// Returns `None` without calling `delta` when no ship is loaded.
    pub fn apply<R>(&mut self, delta: impl FnOnce(&mut ShipState) -> R) -> Option<R> {
        let ship = self.ship.as_mut()?;
        let before = ship.clone();
        let result = delta(ship);
        ship.clamp_gauges();
        if *ship != before {
            self.revision += 1;
        }
        Some(result)
    }

    /// Swap in the result of a pure step function.
    pub fn replace_with(&mut self, step: impl FnOnce(&ShipState) -> ShipState) -> bool {
        let Some(ship) = self.ship.as_mut() else {
            return false;
        };
        let mut next = step(ship);
        next.clamp_gauges();
        if next != *ship {
            *ship = next;
            self.revision += 1;
            true
        } else {
            false
        }
    }

    /// The ship, if it changed since the last call.
    pub fn take_pending(&mut self) -> Option<&ShipState> {
        if self.revision == self.reported {
            return None;
        }
        self.reported = self.revision;
        self.ship.as_ref()
    }
}
