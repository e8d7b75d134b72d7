//! Thread-safe simulation handle
//!
//! The accelerometer context writes and the render thread reads. The lock is
//! held only for one integrate step or one position copy, never while drawing,
//! and haptic pulses are fired after it is released.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use glam::Vec2;
use parking_lot::Mutex;

use super::integrate::{StepReport, integrate};
use super::state::SimState;
use crate::platform::haptics::Haptics;

/// Clonable handle shared by the input and render contexts
#[derive(Clone)]
pub struct SharedSim {
    state: Arc<Mutex<SimState>>,
    /// Set by every integrate, cleared when a frame picks up the change
    dirty: Arc<AtomicBool>,
    haptics: Arc<dyn Haptics>,
    pulse: Duration,
}

impl SharedSim {
    pub fn new(state: SimState, haptics: Arc<dyn Haptics>, pulse: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            dirty: Arc::new(AtomicBool::new(true)),
            haptics,
            pulse,
        }
    }

    /// Apply one acceleration delta, pulse for new border contacts, mark dirty
    pub fn integrate(&self, ax: f32, ay: f32) -> StepReport {
        let report = {
            let mut state = self.state.lock();
            integrate(&mut state, Vec2::new(ax, ay))
        };

        for _ in 0..report.pulses() {
            self.haptics.pulse(self.pulse);
        }
        self.dirty.store(true, Ordering::Release);

        report
    }

    /// Current sprite position (short lock, copied out)
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.state.lock().pos()
    }

    /// Whether the state changed since the last `take_dirty`, clearing the flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Hand a taken change back so the next frame picks it up
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }
}

impl std::fmt::Debug for SharedSim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSim")
            .field("state", &*self.state.lock())
            .field("dirty", &self.is_dirty())
            .field("pulse", &self.pulse)
            .finish_non_exhaustive()
    }
}
