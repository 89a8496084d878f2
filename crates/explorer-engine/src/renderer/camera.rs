use glam::Vec2;

use crate::api::types::Viewport;

/// Screen-space camera that eases the ship toward the viewport center.
///
/// The camera is a single offset added to every world position at draw
/// time: `screen = world + offset`. Each frame the offset moves a fixed
/// fraction of the way to the value that would center the ship.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTracker {
    /// Current world-to-screen translation.
    pub offset: Vec2,
    /// Fraction of the remaining distance covered per frame, in (0, 1).
    smoothing: f32,
}

impl CameraTracker {
    pub fn new(smoothing: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            smoothing: smoothing.clamp(0.001, 0.999),
        }
    }

    /// Offset that would put `ship_pos` exactly at the viewport center.
    pub fn target_for(ship_pos: Vec2, viewport: Viewport) -> Vec2 {
        viewport.center() - ship_pos
    }

    /// Ease toward the ship. Without a ship the camera holds still.
    pub fn follow(&mut self, ship_pos: Option<Vec2>, viewport: Viewport) -> Vec2 {
        if let Some(pos) = ship_pos {
            let target = Self::target_for(pos, viewport);
            self.offset += (target - self.offset) * self.smoothing;
        }
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
    }

    /// World position to screen position.
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world + self.offset
    }

    /// Check if a world-space rectangle overlaps the viewport once offset.
    pub fn is_rect_visible(&self, rect_center: Vec2, rect_half_size: Vec2, viewport: Viewport) -> bool {
        let center = self.to_screen(rect_center);
        let min = center - rect_half_size;
        let max = center + rect_half_size;
        max.x >= 0.0 && min.x <= viewport.width && max.y >= 0.0 && min.y <= viewport.height
    }
}

impl Default for CameraTracker {
    fn default() -> Self {
        Self::new(0.1)
    }
}
