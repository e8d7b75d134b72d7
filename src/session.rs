//! Host lifecycle
//!
//! The host drives a session through explicit calls instead of framework
//! callbacks:
//! - `on_start`: the drawable surface exists, rendering begins
//! - `on_resume`: the sensor listener is registered
//! - `on_suspend`: the sensor listener is unregistered (rendering continues)
//! - `on_stop`: rendering stops, the session ends for good

use std::sync::Arc;

use crate::error::SessionError;
use crate::platform::haptics::Haptics;
use crate::platform::input::{InputAdapter, RawSample};
use crate::renderer::{BallScene, FrameStats, LoopState, RenderLoop, Sprite, Surface};
use crate::settings::Settings;
use crate::sim::{SharedSim, SimState, StepReport};

/// Session phase. Ended is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Built, nothing running
    Created,
    /// Rendering, sensor samples ignored
    Paused,
    /// Rendering and integrating samples
    Active,
    Ended,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Created => "created",
            SessionPhase::Paused => "paused",
            SessionPhase::Active => "active",
            SessionPhase::Ended => "ended",
        }
    }
}

/// One ball, one surface, one run
pub struct Session<S: Surface> {
    phase: SessionPhase,
    settings: Settings,
    sim: SharedSim,
    input: Arc<InputAdapter>,
    render: RenderLoop<S, BallScene>,
}

impl<S: Surface> Session<S> {
    /// Build the simulation from the surface and sprite sizes
    pub fn new(settings: Settings, surface: S, sprite: Sprite, haptics: Arc<dyn Haptics>) -> Self {
        let (width, height) = surface.size();
        let surface_size = glam::Vec2::new(width as f32, height as f32);
        if surface_size != settings.surface_size() {
            log::debug!(
                "Surface is {}x{}, settings asked for {}x{}",
                width,
                height,
                settings.surface_width,
                settings.surface_height
            );
        }

        let state = SimState::new(surface_size, sprite.size(), settings.start());
        let sim = SharedSim::new(state, haptics, settings.haptic_pulse());
        let input = Arc::new(InputAdapter::new(sim.clone(), settings.axis_mapping));
        let scene = BallScene::new(settings.background_color, sprite);
        let render = RenderLoop::new(surface, scene, sim.clone());

        Self {
            phase: SessionPhase::Created,
            settings,
            sim,
            input,
            render,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sim(&self) -> &SharedSim {
        &self.sim
    }

    /// Sensor entry point, shareable with the host's sensor thread
    pub fn input(&self) -> Arc<InputAdapter> {
        Arc::clone(&self.input)
    }

    pub fn render_state(&self) -> LoopState {
        self.render.state()
    }

    /// The surface, once rendering has stopped
    pub fn surface(&self) -> Option<&S> {
        self.render.surface()
    }

    /// Created → Paused: the surface is ready, start rendering
    pub fn on_start(&mut self) -> Result<(), SessionError> {
        self.expect_phase("on_start", &[SessionPhase::Created])?;
        self.render.start()?;
        self.phase = SessionPhase::Paused;
        log::info!("Session started");
        Ok(())
    }

    /// Paused → Active: register for sensor samples
    pub fn on_resume(&mut self) -> Result<(), SessionError> {
        self.expect_phase("on_resume", &[SessionPhase::Paused])?;
        self.input.register();
        self.phase = SessionPhase::Active;
        log::debug!(
            "Sensor registered at {} rate",
            self.settings.sample_rate.as_str()
        );
        Ok(())
    }

    /// Active → Paused: unregister from sensor samples
    pub fn on_suspend(&mut self) -> Result<(), SessionError> {
        self.expect_phase("on_suspend", &[SessionPhase::Active])?;
        self.input.unregister();
        self.phase = SessionPhase::Paused;
        log::debug!("Sensor unregistered");
        Ok(())
    }

    /// Forward a host sample; ignored unless Active
    pub fn on_sample(&self, raw: RawSample) -> Option<StepReport> {
        self.input.on_sample(raw)
    }

    /// Any live phase → Ended: stop input and rendering
    pub fn on_stop(&mut self) -> Result<FrameStats, SessionError> {
        self.expect_phase(
            "on_stop",
            &[
                SessionPhase::Created,
                SessionPhase::Paused,
                SessionPhase::Active,
            ],
        )?;
        self.input.unregister();
        self.phase = SessionPhase::Ended;
        let stats = self.render.stop()?;
        log::info!(
            "Session ended: {} samples integrated, {} dropped",
            self.input.delivered(),
            self.input.dropped()
        );
        Ok(stats)
    }

    fn expect_phase(
        &self,
        call: &'static str,
        allowed: &[SessionPhase],
    ) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::InvalidCall {
                call,
                phase: self.phase.as_str(),
            })
        }
    }
}

impl<S: Surface> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("sim", &self.sim)
            .field("render", &self.render)
            .finish_non_exhaustive()
    }
}
