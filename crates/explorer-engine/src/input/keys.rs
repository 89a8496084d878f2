/// Flight controls recognised by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightKey {
    /// W / ArrowUp
    Forward,
    /// S / ArrowDown
    Reverse,
    /// A / ArrowLeft
    Left,
    /// D / ArrowRight
    Right,
}

impl FlightKey {
    /// Map a host key identifier (DOM `KeyboardEvent.key`) to a control.
    /// Case-insensitive; anything else is `None` and should be ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Some(Self::Forward),
            "s" | "arrowdown" => Some(Self::Reverse),
            "a" | "arrowleft" => Some(Self::Left),
            "d" | "arrowright" => Some(Self::Right),
            _ => None,
        }
    }
}

/// A key transition delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(FlightKey),
    Up(FlightKey),
}
