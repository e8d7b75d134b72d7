//! Error types for the drawing, render loop, asset and session layers

use thiserror::Error;

/// Failure while filling or drawing into an acquired canvas.
///
/// Never prevents the canvas from being released.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("canvas buffer holds {actual} pixels, expected {width}x{height}")]
    CanvasSize {
        width: u32,
        height: u32,
        actual: usize,
    },
    #[error("host draw failure: {0}")]
    Host(String),
}

/// Render loop lifecycle failures
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("render loop cannot go from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
    #[error("failed to spawn render thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("render thread panicked")]
    ThreadPanicked,
}

/// Malformed sprite asset (fatal for the host at startup)
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("sprite dimensions must be non-zero, got {width}x{height}")]
    EmptySprite { width: u32, height: u32 },
    #[error("sprite bytes: expected {expected}, got {actual}")]
    ByteLength { expected: usize, actual: usize },
}

/// Settings could not be parsed
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[error("{0} is set but not valid unicode")]
    NotUnicode(&'static str),
}

/// Host lifecycle call made in the wrong phase, or a render loop failure
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session cannot handle `{call}` while {phase}")]
    InvalidCall {
        call: &'static str,
        phase: &'static str,
    },
    #[error(transparent)]
    Loop(#[from] LoopError),
}
