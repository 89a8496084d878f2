/// Render layer. Controls draw order within a frame.
///
/// Layers are drawn back-to-front: Background first, Effects last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RenderLayer {
    /// Parallax starfield.
    Background = 0,
    /// Planets, stations and other world objects.
    Objects = 1,
    Ship = 2,
    /// Thrust trail and other vector effects.
    Effects = 3,
}

impl RenderLayer {
    /// Total number of render layers.
    pub const COUNT: usize = 4;

    pub const ALL: [RenderLayer; Self::COUNT] = [
        RenderLayer::Background,
        RenderLayer::Objects,
        RenderLayer::Ship,
        RenderLayer::Effects,
    ];

    /// Convert from a u8 value. Returns None if out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
