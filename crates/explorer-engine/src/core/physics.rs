//! Unit-step Euler integration for the pilot's ship.
//!
//! One call to [`integrate`] is one physics tick: move, drag, speed cap,
//! wrap at the viewport edges. Motion is expressed per tick, never per
//! second, so results do not depend on the display refresh rate.

use glam::Vec2;

use crate::api::types::Viewport;
use crate::ship::state::ShipState;

/// Advance the ship by one physics tick.
///
/// Pure: returns the next state and leaves the input untouched.
pub fn integrate(ship: &ShipState, viewport: Viewport, friction: f32) -> ShipState {
    let mut next = ship.clone();

    next.position += next.velocity;
    next.velocity *= friction;
    next.velocity = clamp_speed(next.velocity, next.max_speed());
    next.position = wrap_position(next.position, viewport);
    next.clamp_gauges();

    next
}

/// Rescale `velocity` so its length does not exceed `max_speed`.
/// Direction is preserved; a zero vector is returned untouched.
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed == 0.0 || !speed.is_finite() || speed <= max_speed {
        return velocity;
    }
    if max_speed <= 0.0 {
        return Vec2::ZERO;
    }
    let ratio = speed / max_speed;
    Vec2::new(velocity.x / ratio, velocity.y / ratio)
}

/// Torus wrap: leaving one edge re-enters at the opposite edge.
/// Each axis wraps independently.
pub fn wrap_position(position: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        wrap_axis(position.x, viewport.width),
        wrap_axis(position.y, viewport.height),
    )
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::class::ShipClass;

    const EPS: f32 = 1e-5;
    const FRICTION: f32 = 0.99;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn ship_at(x: f32, y: f32) -> ShipState {
        ShipState::new(Vec2::new(x, y), ShipClass::Explorer.handling())
    }

    #[test]
    fn moves_then_drags() {
        let mut ship = ship_at(100.0, 100.0);
        ship.velocity = Vec2::new(0.3, 0.0);

        let next = integrate(&ship, viewport(), FRICTION);

        assert!((next.position.x - 100.3).abs() < EPS);
        assert!((next.position.y - 100.0).abs() < EPS);
        assert!((next.velocity.x - 0.297).abs() < EPS);
        assert_eq!(next.velocity.y, 0.0);
    }

    #[test]
    fn input_state_is_not_mutated() {
        let mut ship = ship_at(10.0, 10.0);
        ship.velocity = Vec2::new(1.0, 1.0);
        let before = ship.clone();
        let _ = integrate(&ship, viewport(), FRICTION);
        assert_eq!(ship, before);
    }

    #[test]
    fn drag_decays_toward_zero() {
        let mut ship = ship_at(400.0, 300.0);
        ship.velocity = Vec2::new(2.0, -1.0);
        for _ in 0..2000 {
            ship = integrate(&ship, viewport(), FRICTION);
        }
        assert!(ship.velocity.length() < 1e-3);
    }

    #[test]
    fn clamp_hits_max_speed_and_keeps_direction() {
        let cases = [
            Vec2::new(30.0, 40.0),
            Vec2::new(-12.0, 0.5),
            Vec2::new(0.0, -9.0),
            Vec2::new(100.0, 100.0),
        ];
        for v in cases {
            let clamped = clamp_speed(v, 8.0);
            assert!((clamped.length() - 8.0).abs() < 1e-4, "{:?} -> {:?}", v, clamped);
            let dir_in = v.normalize();
            let dir_out = clamped.normalize();
            assert!((dir_in - dir_out).length() < 1e-5);
        }
    }

    #[test]
    fn clamp_leaves_slow_and_zero_velocity_alone() {
        assert_eq!(clamp_speed(Vec2::new(1.0, 2.0), 8.0), Vec2::new(1.0, 2.0));
        let zero = clamp_speed(Vec2::ZERO, 8.0);
        assert_eq!(zero, Vec2::ZERO);
        assert!(!zero.x.is_nan());
        assert_eq!(clamp_speed(Vec2::ZERO, 0.0), Vec2::ZERO);
    }

    #[test]
    fn integrate_caps_speed_after_drag() {
        let mut ship = ship_at(400.0, 300.0);
        ship.velocity = Vec2::new(20.0, 0.0);
        let next = integrate(&ship, viewport(), FRICTION);
        assert!((next.velocity.length() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn wraps_each_edge() {
        let vp = viewport();
        assert_eq!(wrap_position(Vec2::new(-0.5, 10.0), vp), Vec2::new(800.0, 10.0));
        assert_eq!(wrap_position(Vec2::new(800.5, 10.0), vp), Vec2::new(0.0, 10.0));
        assert_eq!(wrap_position(Vec2::new(10.0, -2.0), vp), Vec2::new(10.0, 600.0));
        assert_eq!(wrap_position(Vec2::new(10.0, 601.0), vp), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn axes_wrap_independently() {
        let wrapped = wrap_position(Vec2::new(-1.0, 700.0), viewport());
        assert_eq!(wrapped, Vec2::new(800.0, 0.0));
        let only_x = wrap_position(Vec2::new(-1.0, 300.0), viewport());
        assert_eq!(only_x, Vec2::new(800.0, 300.0));
    }

    #[test]
    fn integration_wraps_across_left_edge() {
        let mut ship = ship_at(0.5, 300.0);
        ship.velocity = Vec2::new(-2.0, 0.0);
        let next = integrate(&ship, viewport(), FRICTION);
        assert_eq!(next.position.x, 800.0);
    }

    #[test]
    fn gauges_stay_in_range_after_tick() {
        let mut ship = ship_at(100.0, 100.0);
        ship.hull = 180.0;
        ship.cargo_weight = -20.0;
        let next = integrate(&ship, viewport(), FRICTION);
        for g in next.gauges() {
            assert!((0.0..=100.0).contains(&g));
        }
    }
}
