//! Platform abstraction layer
//!
//! Host collaborators the core talks to:
//! - Accelerometer samples and their axis calibration
//! - Haptic pulses
//! - A sensor pump thread for hosts without a sensor callback

pub mod haptics;
pub mod input;
pub mod pump;

pub use haptics::{ChannelHaptics, HapticPulse, Haptics, NullHaptics};
pub use input::{AxisMapping, InputAdapter, RawSample, SampleRate};
pub use pump::{SampleSource, SensorPump, TiltSource};
