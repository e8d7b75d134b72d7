//! Sensor pump thread and a synthetic tilt source
//!
//! Hosts with a real accelerometer call `InputAdapter::on_sample` from their
//! own callback. `SensorPump` stands in for that callback by pulling from a
//! `SampleSource` at the nominal rate.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::input::{InputAdapter, RawSample, SampleRate};
use crate::cancel::CancelToken;
use crate::error::LoopError;

/// Something that produces accelerometer readings.
///
/// Any sendable iterator of samples is a source.
pub trait SampleSource: Send + 'static {
    /// Next reading, or `None` once the source is exhausted
    fn next_sample(&mut self) -> Option<RawSample>;
}

impl<I> SampleSource for I
where
    I: Iterator<Item = RawSample> + Send + 'static,
{
    fn next_sample(&mut self) -> Option<RawSample> {
        self.next()
    }
}

/// Seeded device wobble: a slow oscillation on each axis plus jitter
#[derive(Debug, Clone)]
pub struct TiltSource {
    rng: Pcg32,
    tick: u64,
    amplitude: f32,
    jitter: f32,
}

impl TiltSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            tick: 0,
            amplitude: 0.6,
            jitter: 0.05,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f32, jitter: f32) -> Self {
        self.amplitude = amplitude;
        self.jitter = jitter.abs();
        self
    }
}

impl Iterator for TiltSource {
    type Item = RawSample;

    fn next(&mut self) -> Option<RawSample> {
        let t = self.tick as f32 * 0.02;
        self.tick += 1;
        // Incommensurate periods so the ball wanders over the whole surface
        let a = self.amplitude * (t * 0.7).sin();
        let b = self.amplitude * (t * 1.3).cos();
        let (ja, jb) = if self.jitter > 0.0 {
            (
                self.rng.random_range(-self.jitter..=self.jitter),
                self.rng.random_range(-self.jitter..=self.jitter),
            )
        } else {
            (0.0, 0.0)
        };
        Some(RawSample::new(a + ja, b + jb))
    }
}

/// Background thread feeding an `InputAdapter` at a nominal rate
#[derive(Debug)]
pub struct SensorPump {
    token: CancelToken,
    handle: Option<JoinHandle<u64>>,
}

impl SensorPump {
    /// Spawn the pump thread
    pub fn spawn<S: SampleSource>(
        mut source: S,
        input: Arc<InputAdapter>,
        rate: SampleRate,
    ) -> Result<Self, LoopError> {
        let token = CancelToken::new();
        let thread_token = token.clone();
        let interval = rate.interval();

        let handle = thread::Builder::new()
            .name("metal-ball-sensor".into())
            .spawn(move || {
                let mut pumped = 0u64;
                while !thread_token.is_cancelled() {
                    let Some(sample) = source.next_sample() else {
                        log::debug!("Sample source exhausted after {} samples", pumped);
                        break;
                    };
                    input.on_sample(sample);
                    pumped += 1;
                    if interval.is_zero() {
                        thread::yield_now();
                    } else {
                        thread::sleep(interval);
                    }
                }
                pumped
            })?;

        log::info!("Sensor pump started at {} rate", rate.as_str());
        Ok(Self {
            token,
            handle: Some(handle),
        })
    }

    /// Stop the thread and return how many samples it pumped
    pub fn stop(mut self) -> Result<u64, LoopError> {
        self.token.cancel();
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| LoopError::ThreadPanicked),
            None => Ok(0),
        }
    }
}

impl Drop for SensorPump {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
