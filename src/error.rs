//! Construction-time errors.
//!
//! Only misconfiguration surfaces as an error: a denied action transition or
//! an unknown scheduler task is an ordinary `bool` outcome and never reaches
//! this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActorError {
    /// An action name that has no animation was referenced.
    #[error("unknown action `{0}`: no animation is registered under that name")]
    UnknownAction(String),
    /// Every actor must be able to fall back to `idle`.
    #[error("animation set has no `idle` action")]
    MissingIdle,
    /// Animations need at least one frame.
    #[error("animation `{0}` has no frames")]
    EmptyAnimation(String),
    /// Lookup of an animation set that was never loaded.
    #[error("unknown animation set `{0}`")]
    UnknownSet(String),
    #[error("failed to parse animation data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read animation data: {0}")]
    Io(#[from] std::io::Error),
}
