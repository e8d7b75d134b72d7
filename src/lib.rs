//! Metal Ball - a tilt-driven ball bounded by the screen edges
//!
//! Core modules:
//! - `sim`: Ball integration, border clamping and edge-triggered contact pulses
//! - `renderer`: Canvas, sprite and the threaded acquire/draw/release loop
//! - `platform`: Host collaborators (accelerometer input, haptics)
//! - `session`: Explicit host lifecycle driving the other modules
//! - `settings`: Data-driven session configuration

pub mod cancel;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use cancel::CancelToken;
pub use error::{AssetError, DrawError, LoopError, SessionError, SettingsError};
pub use session::{Session, SessionPhase};
pub use settings::Settings;

/// Session configuration defaults
pub mod consts {
    use std::time::Duration;

    /// Sprite top-left corner at session start
    pub const START_POSITION: (f32, f32) = (10.0, 10.0);

    /// Flat background fill (opaque light grey, ARGB)
    pub const BACKGROUND_COLOR: u32 = 0xFFAA_AAAA;

    /// Haptic pulse length for a new border contact
    pub const HAPTIC_PULSE: Duration = Duration::from_millis(100);

    /// Default surface size (landscape)
    pub const SURFACE_WIDTH: u32 = 800;
    pub const SURFACE_HEIGHT: u32 = 480;

    /// Default ball sprite diameter in pixels
    pub const SPRITE_DIAMETER: u32 = 50;

    /// Ball sprite base color (steel grey, ARGB)
    pub const BALL_COLOR: u32 = 0xFF70_7880;

    /// Largest accepted surface side in pixels
    pub const MAX_SURFACE_SIDE: u32 = 16_384;
    /// Largest accepted sprite diameter in pixels
    pub const MAX_SPRITE_DIAMETER: u32 = 4_096;
}
