//! Metal Ball headless demo
//!
//! Runs one session on an in-memory surface, tilting the "device" with a
//! seeded synthetic accelerometer, and logs every border bump.
//! Set `METAL_BALL_SETTINGS` to a JSON object to override settings and
//! `RUST_LOG` to change verbosity.

use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;

use metal_ball::platform::{ChannelHaptics, SensorPump, TiltSource};
use metal_ball::renderer::{HeadlessSurface, Sprite};
use metal_ball::{Session, Settings};

/// How long the demo tilts the device
const RUN_TIME: Duration = Duration::from_secs(3);
const TILT_SEED: u64 = 0x6d65_7461_6c62;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()?;
    let (haptics, pulses) = ChannelHaptics::new(64);
    let surface = HeadlessSurface::new(settings.surface_width, settings.surface_height);
    let monitor = surface.monitor();
    let sprite = Sprite::ball(settings.sprite_diameter, settings.ball_color);

    let mut session = Session::new(settings, surface, sprite, Arc::new(haptics));
    session.on_start()?;
    session.on_resume()?;

    let rate = session.settings().sample_rate;
    log::info!("Sampling tilt at {} rate", rate.as_str());
    let pump = SensorPump::spawn(TiltSource::new(TILT_SEED), session.input(), rate)?;

    let started = Instant::now();
    let mut bumps = 0u32;
    while started.elapsed() < RUN_TIME {
        match pulses.recv_timeout(Duration::from_millis(50)) {
            Ok(pulse) => {
                bumps += 1;
                log::info!(
                    "Bump #{} ({} ms) at {:?}",
                    bumps,
                    pulse.duration.as_millis(),
                    session.sim().position()
                );
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    session.on_suspend()?;
    let samples = pump.stop()?;
    let stats = session.on_stop()?;

    let elapsed = started.elapsed().as_secs_f64();
    log::info!(
        "{} samples, {} bumps, {} frames presented ({:.0} fps), {} skipped, {} draw failures",
        samples,
        bumps,
        monitor.released(),
        stats.presented as f64 / elapsed,
        stats.skipped,
        stats.draw_failures
    );
    log::info!("Final position {:?}", session.sim().position());

    Ok(())
}
