//! Haptic feedback sinks
//!
//! Pulses are fire-and-forget: a sink must never block the caller, which is
//! the accelerometer callback.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};

/// A single vibration request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticPulse {
    pub duration: Duration,
}

/// Host vibration motor
pub trait Haptics: Send + Sync + 'static {
    fn pulse(&self, duration: Duration);
}

/// Discards every pulse (hosts without a vibration motor)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHaptics;

impl Haptics for NullHaptics {
    fn pulse(&self, _duration: Duration) {}
}

/// Forwards pulses to a bounded channel drained by the host's motor driver.
///
/// A full or disconnected channel drops the pulse.
#[derive(Debug, Clone)]
pub struct ChannelHaptics {
    tx: Sender<HapticPulse>,
}

impl ChannelHaptics {
    /// Create a sink and the receiver the host drains
    pub fn new(capacity: usize) -> (Self, Receiver<HapticPulse>) {
        let (tx, rx) = bounded(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl Haptics for ChannelHaptics {
    fn pulse(&self, duration: Duration) {
        match self.tx.try_send(HapticPulse { duration }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => log::debug!("Haptic queue full, pulse dropped"),
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("Haptic receiver gone, pulse dropped")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_haptics_delivers() {
        let (haptics, rx) = ChannelHaptics::new(4);
        haptics.pulse(Duration::from_millis(100));
        assert_eq!(
            rx.try_recv().ok(),
            Some(HapticPulse {
                duration: Duration::from_millis(100)
            })
        );
    }

    #[test]
    fn test_channel_haptics_never_blocks() {
        let (haptics, rx) = ChannelHaptics::new(1);
        haptics.pulse(Duration::from_millis(100));
        // Second pulse is dropped rather than blocking
        haptics.pulse(Duration::from_millis(100));
        assert_eq!(rx.len(), 1);

        drop(rx);
        haptics.pulse(Duration::from_millis(100));
    }
}
