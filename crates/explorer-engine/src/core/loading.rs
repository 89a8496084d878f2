use crate::core::rng::Rng;

/// Status lines shown while the title sequence runs, in order.
pub const LOADING_MESSAGES: [&str; 8] = [
    "INITIALIZING QUANTUM MATRIX...",
    "CALIBRATING STELLAR CARTOGRAPHY...",
    "ESTABLISHING NEURAL LINK...",
    "LOADING SHIP SYSTEMS...",
    "SYNCHRONIZING WARP CORE...",
    "ACTIVATING LIFE SUPPORT...",
    "CONNECTING TO GALACTIC NETWORK...",
    "FINALIZING INITIALIZATION...",
];

const STEP_MIN: f32 = 5.0;
const STEP_MAX: f32 = 20.0;
const DELAY_MIN_MS: f32 = 200.0;
const DELAY_MAX_MS: f32 = 500.0;
/// Pause between reaching 100% and leaving the title screen.
pub const COMPLETE_HOLD_MS: f64 = 500.0;

/// Progress bar of the title/loading screen.
///
/// The host calls [`LoadingSequence::step`] after each
/// [`LoadingSequence::next_delay_ms`]; once complete it waits
/// [`COMPLETE_HOLD_MS`] and moves on to the menu.
#[derive(Debug, Clone)]
pub struct LoadingSequence {
    progress: f32,
    message: usize,
    rng: Rng,
}

impl LoadingSequence {
    pub fn new(seed: u64) -> Self {
        Self {
            progress: 0.0,
            message: 0,
            rng: Rng::new(seed),
        }
    }

    /// Advance by a random 5–20 %. Returns the new progress.
    pub fn step(&mut self) -> f32 {
        if self.is_complete() {
            return self.progress;
        }
        let next = self.progress + self.rng.range(STEP_MIN, STEP_MAX);
        let index = ((next / 100.0) * LOADING_MESSAGES.len() as f32).floor() as usize;
        self.message = index.min(LOADING_MESSAGES.len() - 1);
        self.progress = next.min(100.0);
        self.progress
    }

    /// Random wait before the next step, 200–500 ms. Once complete this is
    /// the fixed hold before the menu.
    pub fn next_delay_ms(&mut self) -> f64 {
        if self.is_complete() {
            return COMPLETE_HOLD_MS;
        }
        self.rng.range(DELAY_MIN_MS, DELAY_MAX_MS) as f64
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn message(&self) -> &'static str {
        LOADING_MESSAGES[self.message]
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100.0
    }
}
