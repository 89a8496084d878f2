//! Energy budget of the ship's subsystems.
//!
//! Runs on its own fixed cadence. Each invocation drains energy for every
//! active consumer, regenerates from the reactor, and shuts down systems the
//! remaining charge can no longer carry.

use crate::ship::state::{clamp_gauge, ShipState, SystemKind};

pub const SHIELDS_COST: f32 = 0.1;
pub const WARP_COST: f32 = 0.2;
pub const ENGINES_COST: f32 = 0.05;
pub const THRUST_COST: f32 = 0.3;
pub const REACTOR_REGEN: f32 = 0.15;

/// Shields drop at or below this charge.
pub const SHIELDS_CUTOFF: f32 = 10.0;
/// Warp drops at or below this charge.
pub const WARP_CUTOFF: f32 = 20.0;

/// What one energy tick did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyReport {
    pub drain: f32,
    pub regen: f32,
    /// Energy after the tick differs from before.
    pub energy_changed: bool,
    /// Shields were on and got forced off.
    pub shields_cut: bool,
    /// Warp was on and got forced off.
    pub warp_cut: bool,
}

impl EnergyReport {
    /// Whether the host needs to hear about this tick.
    pub fn changed(&self) -> bool {
        self.energy_changed || self.shields_cut || self.warp_cut
    }
}

/// Total drain per tick for the ship's current activity.
pub fn drain(ship: &ShipState) -> f32 {
    let mut drain = 0.0;
    if ship.systems.shields {
        drain += SHIELDS_COST;
    }
    if ship.systems.warp {
        drain += WARP_COST;
    }
    if ship.systems.engines {
        drain += ENGINES_COST;
    }
    if ship.is_thrusting {
        drain += THRUST_COST;
    }
    drain
}

pub fn regen(ship: &ShipState) -> f32 {
    if ship.systems.reactor {
        REACTOR_REGEN
    } else {
        0.0
    }
}

/// One energy tick.
pub fn tick(ship: &mut ShipState) -> EnergyReport {
    let drain = drain(ship);
    let regen = regen(ship);
    let before = ship.energy;

    ship.energy = clamp_gauge(ship.energy - drain + regen);

    let mut report = EnergyReport {
        drain,
        regen,
        energy_changed: ship.energy != before,
        ..Default::default()
    };

    // Re-checked every tick: a system stays off until the pilot re-enables it.
    if ship.energy <= SHIELDS_CUTOFF && ship.systems.shields {
        ship.systems.set(SystemKind::Shields, false);
        report.shields_cut = true;
        log::debug!("energy {:.2}: shields forced off", ship.energy);
    }
    if ship.energy <= WARP_CUTOFF && ship.systems.warp {
        ship.systems.set(SystemKind::Warp, false);
        report.warp_cut = true;
        log::debug!("energy {:.2}: warp forced off", ship.energy);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::class::ShipClass;
    use crate::ship::state::ShipSystems;
    use glam::Vec2;

    const EPS: f32 = 1e-5;

    fn ship_with(systems: ShipSystems, thrusting: bool, energy: f32) -> ShipState {
        let mut ship = ShipState::new(Vec2::ZERO, ShipClass::Explorer.handling());
        ship.systems = systems;
        ship.is_thrusting = thrusting;
        ship.energy = energy;
        ship
    }

    const ALL_ON: ShipSystems = ShipSystems {
        shields: true,
        warp: true,
        engines: true,
        reactor: true,
    };

    #[test]
    fn full_load_drain() {
        let ship = ship_with(ALL_ON, true, 50.0);
        assert!((drain(&ship) - 0.65).abs() < EPS);
        assert!((regen(&ship) - 0.15).abs() < EPS);
    }

    #[test]
    fn full_load_net_is_minus_half() {
        let mut ship = ship_with(ALL_ON, true, 50.0);
        let report = tick(&mut ship);
        assert!((ship.energy - 49.5).abs() < 1e-4);
        assert!(report.energy_changed);
    }

    #[test]
    fn energy_floors_at_zero() {
        let mut ship = ship_with(ALL_ON, true, 0.2);
        tick(&mut ship);
        assert_eq!(ship.energy, 0.0);
        assert!(!ship.systems.shields);
        assert!(!ship.systems.warp);
    }

    #[test]
    fn energy_caps_at_hundred() {
        let idle = ShipSystems {
            reactor: true,
            ..Default::default()
        };
        let mut ship = ship_with(idle, false, 99.9);
        tick(&mut ship);
        assert_eq!(ship.energy, 100.0);
        let report = tick(&mut ship);
        assert_eq!(ship.energy, 100.0);
        assert!(!report.changed());
    }

    #[test]
    fn shields_cut_when_crossing_ten() {
        let mut ship = ship_with(ALL_ON, true, 11.0);
        ship.systems.reactor = false;
        for _ in 0..2 {
            tick(&mut ship);
        }
        assert!(ship.energy <= SHIELDS_CUTOFF);
        assert!(!ship.systems.shields);
    }

    #[test]
    fn single_tick_crossing_cuts_shields_in_same_invocation() {
        let mut ship = ship_with(ALL_ON, true, 10.6);
        ship.systems.reactor = false;
        let report = tick(&mut ship);
        assert!(ship.energy <= SHIELDS_CUTOFF);
        assert!(report.shields_cut);
        assert!(!ship.systems.shields);
    }

    #[test]
    fn warp_cut_at_twenty() {
        let mut ship = ship_with(ALL_ON, false, 20.2);
        ship.systems.reactor = false;
        let report = tick(&mut ship);
        assert!((ship.energy - 19.85).abs() < 1e-4);
        assert!(report.warp_cut);
        assert!(!ship.systems.warp);
        assert!(ship.systems.shields);
    }

    #[test]
    fn shutoff_rechecked_without_energy_change() {
        let shields_only = ShipSystems {
            shields: true,
            reactor: false,
            ..Default::default()
        };
        let mut ship = ship_with(shields_only, false, 0.0);
        let report = tick(&mut ship);
        assert!(!report.energy_changed);
        assert!(report.shields_cut);
        assert!(report.changed());
    }

    #[test]
    fn cut_system_stays_off_after_recharge() {
        let mut ship = ship_with(ALL_ON, false, 5.0);
        tick(&mut ship);
        assert!(!ship.systems.shields);
        ship.systems.warp = false;
        ship.systems.engines = false;
        ship.energy = 80.0;
        tick(&mut ship);
        assert!(!ship.systems.shields);
    }

    #[test]
    fn no_consumers_no_reactor_is_unchanged() {
        let mut ship = ship_with(ShipSystems::default(), false, 42.0);
        let report = tick(&mut ship);
        assert_eq!(ship.energy, 42.0);
        assert!(!report.changed());
    }
}
