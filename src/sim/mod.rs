//! Ball simulation module
//!
//! `state` and `integrate` are pure: no threads, no rendering, no platform
//! calls. `shared` wraps them for use from the input and render contexts and
//! forwards owed pulses to a haptics sink.

pub mod integrate;
pub mod shared;
pub mod state;

pub use integrate::{AxisReport, StepReport, integrate};
pub use shared::SharedSim;
pub use state::{BorderContact, SimState};
