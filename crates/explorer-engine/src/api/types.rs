use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifies a world object in the static scene list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Numeric handle for a loaded image. Index into the host's image table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageId(pub u32);

/// Drawable area reported by the host, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A viewport with no area cannot host wrap or centering math.
    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_half_size() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn zero_area_is_not_usable() {
        assert!(!Viewport::new(0.0, 600.0).is_usable());
        assert!(!Viewport::new(800.0, f32::NAN).is_usable());
        assert!(Viewport::new(1.0, 1.0).is_usable());
    }
}
