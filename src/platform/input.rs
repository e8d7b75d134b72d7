//! Accelerometer input adapter
//!
//! Raw samples go through a fixed axis calibration before reaching the
//! simulation. The calibration describes how the device is mounted relative
//! to the screen and never changes during a session.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{SharedSim, StepReport};

/// One accelerometer reading on the two screen-plane axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSample {
    /// First sensor axis (device x)
    pub a: f32,
    /// Second sensor axis (device y)
    pub b: f32,
}

impl RawSample {
    pub fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }
}

/// Raw sensor axes to simulation axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMapping {
    /// Simulation x reads sensor `b`, simulation y reads sensor `a`
    pub swap_axes: bool,
    /// Negate simulation x after swapping
    pub invert_x: bool,
    /// Negate simulation y after swapping
    pub invert_y: bool,
}

impl AxisMapping {
    /// Landscape mounting: the sensor's y axis runs along the screen's width
    pub const LANDSCAPE: Self = Self {
        swap_axes: true,
        invert_x: false,
        invert_y: false,
    };

    /// Sensor axes already match the screen
    pub const IDENTITY: Self = Self {
        swap_axes: false,
        invert_x: false,
        invert_y: false,
    };

    /// Map a raw sample to a simulation acceleration delta
    #[inline]
    pub fn apply(&self, raw: RawSample) -> Vec2 {
        let (mut x, mut y) = if self.swap_axes {
            (raw.b, raw.a)
        } else {
            (raw.a, raw.b)
        };
        if self.invert_x {
            x = -x;
        }
        if self.invert_y {
            y = -y;
        }
        Vec2::new(x, y)
    }
}

impl Default for AxisMapping {
    fn default() -> Self {
        Self::LANDSCAPE
    }
}

/// Nominal host sensor delivery rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleRate {
    /// As fast as the hardware allows
    Fastest,
    /// Suited to games (~50 Hz)
    #[default]
    Game,
    /// Suited to UI updates (~15 Hz)
    Ui,
    /// Screen orientation changes (~5 Hz)
    Normal,
}

impl SampleRate {
    /// Nominal delay between two samples
    pub fn interval(&self) -> Duration {
        match self {
            SampleRate::Fastest => Duration::ZERO,
            SampleRate::Game => Duration::from_millis(20),
            SampleRate::Ui => Duration::from_millis(66),
            SampleRate::Normal => Duration::from_millis(200),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleRate::Fastest => "fastest",
            SampleRate::Game => "game",
            SampleRate::Ui => "ui",
            SampleRate::Normal => "normal",
        }
    }
}

/// Routes host samples into the simulation while registered
#[derive(Debug)]
pub struct InputAdapter {
    sim: SharedSim,
    mapping: AxisMapping,
    listening: AtomicBool,
    delivered: AtomicU64,
    dropped: AtomicU64,
}

impl InputAdapter {
    /// New adapter, initially unregistered
    pub fn new(sim: SharedSim, mapping: AxisMapping) -> Self {
        Self {
            sim,
            mapping,
            listening: AtomicBool::new(false),
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Start accepting samples
    pub fn register(&self) {
        self.listening.store(true, Ordering::Release);
    }

    /// Stop accepting samples; later samples are dropped
    pub fn unregister(&self) {
        self.listening.store(false, Ordering::Release);
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    /// Sensor callback. Returns the step outcome, or `None` when unregistered.
    pub fn on_sample(&self, raw: RawSample) -> Option<StepReport> {
        if !self.is_listening() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return None;
        }
        let delta = self.mapping.apply(raw);
        self.delivered.fetch_add(1, Ordering::Relaxed);
        Some(self.sim.integrate(delta.x, delta.y))
    }

    /// Samples that reached the simulation
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Samples dropped while unregistered
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::haptics::NullHaptics;
    use crate::sim::SimState;
    use std::sync::Arc;

    fn adapter(mapping: AxisMapping) -> InputAdapter {
        let state = SimState::new(
            Vec2::new(800.0, 480.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(10.0, 10.0),
        );
        let sim = SharedSim::new(state, Arc::new(NullHaptics), Duration::from_millis(100));
        InputAdapter::new(sim, mapping)
    }

    #[test]
    fn test_landscape_mapping_swaps() {
        let delta = AxisMapping::LANDSCAPE.apply(RawSample::new(1.0, 2.0));
        assert_eq!(delta, Vec2::new(2.0, 1.0));
        assert_eq!(AxisMapping::default(), AxisMapping::LANDSCAPE);
    }

    #[test]
    fn test_mapping_inverts_after_swap() {
        let mapping = AxisMapping {
            swap_axes: true,
            invert_x: true,
            invert_y: false,
        };
        assert_eq!(mapping.apply(RawSample::new(1.0, 2.0)), Vec2::new(-2.0, 1.0));
        assert_eq!(
            AxisMapping::IDENTITY.apply(RawSample::new(1.0, 2.0)),
            Vec2::new(1.0, 2.0)
        );
    }

    #[test]
    fn test_game_rate_interval() {
        assert_eq!(SampleRate::default(), SampleRate::Game);
        assert_eq!(SampleRate::Game.interval(), Duration::from_millis(20));
        assert!(SampleRate::Fastest.interval() < SampleRate::Game.interval());
        assert!(SampleRate::Game.interval() < SampleRate::Normal.interval());
    }

    #[test]
    fn test_unregistered_samples_dropped() {
        let input = adapter(AxisMapping::LANDSCAPE);
        assert!(input.on_sample(RawSample::new(0.0, 5.0)).is_none());
        assert_eq!(input.dropped(), 1);
        assert_eq!(input.sim.position(), Vec2::new(10.0, 10.0));

        input.register();
        assert!(input.on_sample(RawSample::new(0.0, 5.0)).is_some());
        assert_eq!(input.delivered(), 1);
        // Sensor b drives screen x under the landscape mapping
        assert_eq!(input.sim.position(), Vec2::new(15.0, 10.0));

        input.unregister();
        assert!(input.on_sample(RawSample::new(0.0, 5.0)).is_none());
        assert_eq!(input.sim.position(), Vec2::new(15.0, 10.0));
    }
}
