//! Threaded acquire/draw/release loop
//!
//! The loop runs uncapped on its own thread: lock the surface, draw the ball
//! at the latest position, present. Stopping is cooperative; the frame in
//! flight always finishes and is released before the thread exits.

use std::thread::{self, JoinHandle};

use glam::Vec2;

use super::canvas::Canvas;
use super::sprite::Sprite;
use super::surface::{FrameGuard, Surface};
use crate::cancel::CancelToken;
use crate::error::{DrawError, LoopError};
use crate::sim::SharedSim;

/// The per-frame draw operation
pub trait DrawOp: Send + 'static {
    fn draw(&mut self, canvas: &mut Canvas, pos: Vec2) -> Result<(), DrawError>;
}

/// Flat background with the ball sprite on top
#[derive(Debug, Clone)]
pub struct BallScene {
    pub background: u32,
    pub sprite: Sprite,
}

impl BallScene {
    pub fn new(background: u32, sprite: Sprite) -> Self {
        Self { background, sprite }
    }
}

impl DrawOp for BallScene {
    fn draw(&mut self, canvas: &mut Canvas, pos: Vec2) -> Result<(), DrawError> {
        canvas.fill(self.background);
        canvas.draw_sprite(&self.sprite, pos);
        Ok(())
    }
}

/// Draw one frame at the current simulation position.
///
/// Returns `Ok(false)` without touching anything when no canvas is available.
pub fn draw_frame<D: DrawOp + ?Sized>(
    canvas: Option<&mut Canvas>,
    scene: &mut D,
    sim: &SharedSim,
) -> Result<bool, DrawError> {
    let Some(canvas) = canvas else {
        return Ok(false);
    };
    // Copy out under the lock, draw without it
    let pos = sim.position();
    scene.draw(canvas, pos)?;
    Ok(true)
}

/// Render loop lifecycle. Stopped is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Created,
    Running,
    Stopped,
}

impl LoopState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopState::Created => "created",
            LoopState::Running => "running",
            LoopState::Stopped => "stopped",
        }
    }
}

/// Per-run frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames drawn and presented
    pub presented: u64,
    /// Iterations with no surface available
    pub skipped: u64,
    /// Frames whose draw failed (still released)
    pub draw_failures: u64,
    /// Presented frames that picked up a new simulation step
    pub fresh: u64,
}

/// Owns the surface and draw op while not running, hands them to the render
/// thread while running
pub struct RenderLoop<S: Surface, D: DrawOp> {
    state: LoopState,
    sim: SharedSim,
    token: CancelToken,
    parts: Option<(S, D)>,
    handle: Option<JoinHandle<(S, D, FrameStats)>>,
    stats: FrameStats,
    panicked: bool,
}

impl<S: Surface, D: DrawOp> RenderLoop<S, D> {
    pub fn new(surface: S, scene: D, sim: SharedSim) -> Self {
        Self {
            state: LoopState::Created,
            sim,
            token: CancelToken::new(),
            parts: Some((surface, scene)),
            handle: None,
            stats: FrameStats::default(),
            panicked: false,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The surface, available whenever the loop is not running
    pub fn surface(&self) -> Option<&S> {
        self.parts.as_ref().map(|(surface, _)| surface)
    }

    /// Counters from the finished run (zero until stopped)
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Created → Running: spawn the render thread
    pub fn start(&mut self) -> Result<(), LoopError> {
        if self.state != LoopState::Created {
            return Err(LoopError::InvalidTransition {
                from: self.state.as_str(),
                to: LoopState::Running.as_str(),
            });
        }
        let Some((mut surface, mut scene)) = self.parts.take() else {
            return Err(LoopError::InvalidTransition {
                from: self.state.as_str(),
                to: LoopState::Running.as_str(),
            });
        };

        let sim = self.sim.clone();
        let token = self.token.clone();
        let (width, height) = surface.size();

        let handle = thread::Builder::new()
            .name("metal-ball-render".into())
            .spawn(move || {
                let stats = run_frames(&mut surface, &mut scene, &sim, &token);
                (surface, scene, stats)
            })?;

        log::info!("Render loop started on {}x{} surface", width, height);
        self.handle = Some(handle);
        self.state = LoopState::Running;
        Ok(())
    }

    /// Running → Stopped: cancel, wait for the current frame, join.
    ///
    /// Stopping a loop that never started moves it straight to Stopped.
    /// Stopping again returns the same outcome: the counters, or
    /// `ThreadPanicked` if the render thread died.
    pub fn stop(&mut self) -> Result<FrameStats, LoopError> {
        match self.state {
            LoopState::Created => {
                self.state = LoopState::Stopped;
                Ok(self.stats)
            }
            LoopState::Stopped if self.panicked => Err(LoopError::ThreadPanicked),
            LoopState::Stopped => Ok(self.stats),
            LoopState::Running => {
                self.token.cancel();
                self.state = LoopState::Stopped;
                let Some(handle) = self.handle.take() else {
                    return Ok(self.stats);
                };
                match handle.join() {
                    Ok((surface, scene, stats)) => {
                        self.parts = Some((surface, scene));
                        self.stats = stats;
                        log::info!(
                            "Render loop stopped: {} presented, {} skipped, {} failed",
                            stats.presented,
                            stats.skipped,
                            stats.draw_failures
                        );
                        Ok(stats)
                    }
                    Err(_) => {
                        log::error!("Render thread panicked");
                        self.panicked = true;
                        Err(LoopError::ThreadPanicked)
                    }
                }
            }
        }
    }
}

impl<S: Surface, D: DrawOp> Drop for RenderLoop<S, D> {
    fn drop(&mut self) {
        if self.state == LoopState::Running {
            let _ = self.stop();
        }
    }
}

impl<S: Surface, D: DrawOp> std::fmt::Debug for RenderLoop<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderLoop")
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

fn run_frames<S: Surface, D: DrawOp>(
    surface: &mut S,
    scene: &mut D,
    sim: &SharedSim,
    token: &CancelToken,
) -> FrameStats {
    let mut stats = FrameStats::default();

    while !token.is_cancelled() {
        let mut frame = FrameGuard::acquire(surface);
        let fresh = frame.is_ready() && sim.take_dirty();

        match draw_frame(frame.canvas_mut(), scene, sim) {
            Ok(true) => {
                stats.presented += 1;
                stats.fresh += fresh as u64;
            }
            Ok(false) => {
                stats.skipped += 1;
                drop(frame);
                // Nothing to lock yet; let the host finish creating the surface
                thread::yield_now();
            }
            Err(e) => {
                stats.draw_failures += 1;
                // Nothing reached the screen, keep the change for the next frame
                if fresh {
                    sim.mark_dirty();
                }
                log::warn!("Draw failed, frame released anyway: {}", e);
            }
        }
    }

    stats
}
