//! Thrust trail: a tapered wedge behind the ship's engines.

use glam::Vec2;

use crate::renderer::vector::{LinearGradient, VectorColor, VectorState};

const TRAIL_HOT: u32 = 0xff8c00;
const TRAIL_MID: u32 = 0xff4400;

/// Shape of the trail in ship-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailShape {
    /// Edge length of the ship sprite. The trail starts at its rear edge.
    pub ship_size: f32,
    pub length: f32,
    /// Width where the trail leaves the hull.
    pub width: f32,
}

impl TrailShape {
    /// Wedge outline in ship-local space (heading along +x): a quad from the
    /// hull to the midpoint, narrowing to an apex at full length.
    pub fn local_outline(&self) -> [Vec2; 5] {
        let base_x = -self.ship_size / 2.0;
        let mid_x = base_x - self.length / 2.0;
        let half = self.width / 2.0;
        [
            Vec2::new(base_x, -half),
            Vec2::new(mid_x, -half / 2.0),
            Vec2::new(base_x - self.length, 0.0),
            Vec2::new(mid_x, half / 2.0),
            Vec2::new(base_x, half),
        ]
    }
}

/// Gradient from the hull (hot orange) to the apex (transparent).
pub fn trail_gradient(start: Vec2, end: Vec2) -> LinearGradient {
    let hot = VectorColor::hex(TRAIL_HOT);
    let mid = VectorColor::hex(TRAIL_MID);
    LinearGradient {
        start,
        end,
        stops: vec![
            (0.0, hot),
            (0.5, mid),
            (1.0, mid.with_alpha(0.0)),
        ],
    }
}

/// Tessellate the trail for a ship drawn at `center` (screen space) with
/// the given rotation.
pub fn draw_trail(vectors: &mut VectorState, shape: &TrailShape, center: Vec2, rotation: f32) {
    if shape.length <= 0.0 || shape.width <= 0.0 {
        return;
    }
    let rot = Vec2::from_angle(rotation);
    let to_screen = |local: Vec2| center + rot.rotate(local);

    let outline = shape.local_outline().map(to_screen);
    let base_x = -shape.ship_size / 2.0;
    let gradient = trail_gradient(
        to_screen(Vec2::new(base_x, 0.0)),
        to_screen(Vec2::new(base_x - shape.length, 0.0)),
    );
    vectors.fill_polygon_gradient(&outline, &gradient);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vector::VectorVertex;
    use std::f32::consts::PI;

    fn shape() -> TrailShape {
        TrailShape {
            ship_size: 40.0,
            length: 20.0,
            width: 8.0,
        }
    }

    fn positions(vectors: &VectorState) -> Vec<(Vec2, f32)> {
        vectors
            .vertices()
            .chunks(VectorVertex::FLOATS)
            .map(|v| (Vec2::new(v[0], v[1]), v[5]))
            .collect()
    }

    #[test]
    fn outline_sits_behind_rear_edge() {
        let outline = shape().local_outline();
        assert_eq!(outline[0], Vec2::new(-20.0, -4.0));
        assert_eq!(outline[2], Vec2::new(-40.0, 0.0));
        for p in outline {
            assert!(p.x <= -20.0);
        }
    }

    #[test]
    fn trail_points_opposite_heading() {
        let mut vectors = VectorState::new();
        draw_trail(&mut vectors, &shape(), Vec2::new(400.0, 300.0), 0.0);
        let verts = positions(&vectors);
        assert!(!verts.is_empty());
        for (p, _) in &verts {
            assert!(p.x <= 380.0 + 1e-3);
            assert!((p.y - 300.0).abs() <= 4.0 + 1e-3);
        }
    }

    #[test]
    fn trail_rotates_with_ship() {
        let mut vectors = VectorState::new();
        draw_trail(&mut vectors, &shape(), Vec2::new(400.0, 300.0), PI);
        for (p, _) in positions(&vectors) {
            assert!(p.x >= 420.0 - 1e-3);
        }
    }

    #[test]
    fn fades_out_at_apex() {
        let mut vectors = VectorState::new();
        draw_trail(&mut vectors, &shape(), Vec2::ZERO, 0.0);
        let verts = positions(&vectors);
        let apex = verts
            .iter()
            .find(|(p, _)| (p.x + 40.0).abs() < 1e-3)
            .map(|(_, a)| *a);
        assert_eq!(apex, Some(0.0));
        let base = verts
            .iter()
            .find(|(p, _)| (p.x + 20.0).abs() < 1e-3)
            .map(|(_, a)| *a);
        assert_eq!(base, Some(1.0));
    }

    #[test]
    fn zero_length_draws_nothing() {
        let mut vectors = VectorState::new();
        let flat = TrailShape {
            length: 0.0,
            ..shape()
        };
        draw_trail(&mut vectors, &flat, Vec2::ZERO, 0.0);
        assert_eq!(vectors.vertex_count(), 0);
    }
}
