use thiserror::Error;

use crate::core::game_loop::GameMode;

/// Failures around the image set the renderer depends on.
/// The only error class that can keep the piloting screen from drawing.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset manifest is malformed: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("asset manifest has no image for role {0}")]
    MissingRole(&'static str),
    #[error("image `{0}` is not listed in the asset manifest")]
    UnknownImage(String),
    #[error("image `{name}` failed to load: {reason}")]
    LoadFailed { name: String, reason: String },
}

/// A mode change the game loop does not allow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("cannot go from {from:?} to {to:?}")]
    InvalidTransition { from: GameMode, to: GameMode },
    #[error("the loading sequence has not reached 100%")]
    LoadingIncomplete,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("flight config is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
