use std::collections::HashSet;

use crate::api::config::ThrustMode;
use crate::input::keys::{FlightKey, KeyEvent};
use crate::ship::state::ShipState;

/// Reverse thrust is half as strong as forward thrust.
const REVERSE_FACTOR: f32 = 0.5;

/// Turns key transitions into ship commands.
///
/// Commands are applied to the ship as soon as the event arrives. In
/// [`ThrustMode::PerTick`] the mapper only remembers held controls and the
/// physics schedule calls [`InputMapper::apply_held`] once per tick.
#[derive(Debug, Clone)]
pub struct InputMapper {
    mode: ThrustMode,
    held: HashSet<FlightKey>,
}

impl InputMapper {
    pub fn new(mode: ThrustMode) -> Self {
        Self {
            mode,
            held: HashSet::new(),
        }
    }

    pub fn mode(&self) -> ThrustMode {
        self.mode
    }

    pub fn is_held(&self, key: FlightKey) -> bool {
        self.held.contains(&key)
    }

    pub fn handle(&mut self, event: KeyEvent, ship: &mut ShipState) {
        match event {
            KeyEvent::Down(key) => self.key_down(key, ship),
            KeyEvent::Up(key) => self.key_up(key, ship),
        }
    }

    /// Every call counts, including auto-repeat: in per-event mode holding
    /// W for a second applies one impulse per repeat the OS delivers.
    pub fn key_down(&mut self, key: FlightKey, ship: &mut ShipState) {
        self.held.insert(key);
        if key == FlightKey::Forward {
            ship.is_thrusting = true;
        }
        if self.mode == ThrustMode::PerKeyEvent {
            apply_control(key, ship);
        }
    }

    /// Releasing forward thrust clears the thrusting flag; velocity is left alone.
    pub fn key_up(&mut self, key: FlightKey, ship: &mut ShipState) {
        self.held.remove(&key);
        if key == FlightKey::Forward {
            ship.is_thrusting = false;
        }
    }

    /// Apply one step for every held control. No-op in per-event mode.
    pub fn apply_held(&self, ship: &mut ShipState) {
        if self.mode != ThrustMode::PerTick {
            return;
        }
        for key in [
            FlightKey::Forward,
            FlightKey::Reverse,
            FlightKey::Left,
            FlightKey::Right,
        ] {
            if self.held.contains(&key) {
                apply_control(key, ship);
            }
        }
    }

    /// Forget every held control (screen exit, focus loss).
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

fn apply_control(key: FlightKey, ship: &mut ShipState) {
    match key {
        FlightKey::Forward => {
            ship.velocity += ship.heading() * ship.thrust_power();
        }
        FlightKey::Reverse => {
            ship.velocity -= ship.heading() * ship.thrust_power() * REVERSE_FACTOR;
        }
        FlightKey::Left => ship.rotation -= ship.rotation_speed(),
        FlightKey::Right => ship.rotation += ship.rotation_speed(),
    }
}
