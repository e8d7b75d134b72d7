//! Single integration step
//!
//! Each axis is handled independently: the acceleration delta accumulates into
//! velocity (no friction), velocity moves the ball, and a ball that leaves the
//! allowed range is clamped back with its velocity zeroed.

use glam::Vec2;

use super::state::SimState;

/// What happened on one axis during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisReport {
    /// Position was clamped to a border (velocity zeroed)
    pub clamped: bool,
    /// This clamp is a new border contact and owes a haptic pulse
    pub pulse: bool,
}

/// Outcome of a single `integrate` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub x: AxisReport,
    pub y: AxisReport,
}

impl StepReport {
    /// Number of haptic pulses owed (one per axis with a new contact)
    pub fn pulses(&self) -> u32 {
        self.x.pulse as u32 + self.y.pulse as u32
    }

    pub fn any_clamped(&self) -> bool {
        self.x.clamped || self.y.clamped
    }
}

/// Advance the ball by one accelerometer delta
pub fn integrate(state: &mut SimState, delta: Vec2) -> StepReport {
    let max = state.max_pos();
    let (pos, vel, contact) = state.parts_mut();

    let x = step_axis(
        &mut pos.x,
        &mut vel.x,
        &mut contact.away_x,
        sanitize(delta.x, 'x'),
        max.x,
    );
    let y = step_axis(
        &mut pos.y,
        &mut vel.y,
        &mut contact.away_y,
        sanitize(delta.y, 'y'),
        max.y,
    );

    StepReport { x, y }
}

fn step_axis(pos: &mut f32, vel: &mut f32, away: &mut bool, delta: f32, max: f32) -> AxisReport {
    *vel += delta;
    *pos += *vel;

    if *pos > max {
        *pos = max;
    } else if *pos < 0.0 {
        *pos = 0.0;
    } else {
        *away = true;
        return AxisReport::default();
    }

    *vel = 0.0;
    // Edge-triggered: only the first clamp after being away pulses
    let pulse = std::mem::replace(away, false);
    AxisReport {
        clamped: true,
        pulse,
    }
}

/// A non-finite reading would poison velocity and escape the clamp
#[inline]
fn sanitize(delta: f32, axis: char) -> f32 {
    if delta.is_finite() {
        delta
    } else {
        log::warn!("Dropping non-finite acceleration on {} axis: {}", axis, delta);
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BorderContact;

    fn scenario_state() -> SimState {
        SimState::new(
            Vec2::new(800.0, 480.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(10.0, 10.0),
        )
    }

    #[test]
    fn test_free_step_accumulates_velocity() {
        let mut state = scenario_state();

        let report = integrate(&mut state, Vec2::new(100.0, 0.0));
        assert_eq!(state.vel(), Vec2::new(100.0, 0.0));
        assert_eq!(state.pos(), Vec2::new(110.0, 10.0));
        assert_eq!(report, StepReport::default());
        assert!(state.contact().away_x);
        assert!(state.contact().away_y);

        // Deltas accumulate, they are not raw samples
        integrate(&mut state, Vec2::new(100.0, 0.0));
        assert_eq!(state.vel(), Vec2::new(200.0, 0.0));
        assert_eq!(state.pos(), Vec2::new(310.0, 10.0));
    }

    #[test]
    fn test_right_border_clamps_and_pulses_once() {
        let mut state = scenario_state();
        integrate(&mut state, Vec2::new(100.0, 0.0));

        let mut pulses = 0;
        for step in 0..5 {
            let report = integrate(&mut state, Vec2::new(700.0, 0.0));
            assert!(report.x.clamped, "step {step} should clamp");
            assert_eq!(state.pos(), Vec2::new(750.0, 10.0));
            assert_eq!(state.vel().x, 0.0);
            if step == 0 {
                assert!(report.x.pulse);
            } else {
                assert!(!report.x.pulse);
            }
            pulses += report.pulses();
        }
        assert_eq!(pulses, 1);
        assert!(!state.contact().away_x);
    }

    #[test]
    fn test_top_left_clamp_both_axes() {
        let mut state = scenario_state();
        // Leave the start position so both flags read "away"
        integrate(&mut state, Vec2::ZERO);
        assert_eq!(
            state.contact(),
            BorderContact {
                away_x: true,
                away_y: true
            }
        );

        let report = integrate(&mut state, Vec2::new(-50.0, -50.0));
        assert_eq!(state.pos(), Vec2::ZERO);
        assert_eq!(state.vel(), Vec2::ZERO);
        assert!(report.x.pulse && report.y.pulse);
        assert_eq!(report.pulses(), 2);
    }

    #[test]
    fn test_first_step_clamp_without_prior_away_is_silent() {
        // Flags start false, so a clamp on the very first step does not pulse
        let mut state = scenario_state();
        let report = integrate(&mut state, Vec2::new(-50.0, -50.0));
        assert_eq!(state.pos(), Vec2::ZERO);
        assert!(report.x.clamped && report.y.clamped);
        assert_eq!(report.pulses(), 0);
    }

    #[test]
    fn test_clamp_leaves_other_axis_velocity() {
        let mut state = scenario_state();
        integrate(&mut state, Vec2::new(-50.0, 5.0));
        assert_eq!(state.vel(), Vec2::new(0.0, 5.0));
        assert_eq!(state.pos(), Vec2::new(0.0, 15.0));
    }

    #[test]
    fn test_zero_delta_after_clamp_is_stationary() {
        let mut state = scenario_state();
        integrate(&mut state, Vec2::new(10_000.0, 10_000.0));
        let clamped = state.pos();
        assert_eq!(clamped, Vec2::new(750.0, 430.0));
        for _ in 0..10 {
            let report = integrate(&mut state, Vec2::ZERO);
            assert_eq!(state.pos(), clamped);
            assert_eq!(report.pulses(), 0);
        }
    }

    #[test]
    fn test_leaving_border_rearms_pulse() {
        let mut state = scenario_state();
        integrate(&mut state, Vec2::ZERO);
        assert_eq!(integrate(&mut state, Vec2::new(-50.0, 0.0)).pulses(), 1);
        // Pull away, then hit the same border again
        integrate(&mut state, Vec2::new(20.0, 0.0));
        assert!(state.contact().away_x);
        let report = integrate(&mut state, Vec2::new(-100.0, 0.0));
        assert!(report.x.pulse);
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut state = scenario_state();
        integrate(&mut state, Vec2::new(f32::NAN, f32::INFINITY));
        assert_eq!(state.pos(), Vec2::new(10.0, 10.0));
        assert_eq!(state.vel(), Vec2::ZERO);
        assert!(state.in_bounds());
    }

    #[test]
    fn test_huge_delta_clamps_immediately() {
        let mut state = scenario_state();
        integrate(&mut state, Vec2::new(f32::MAX, -f32::MAX));
        integrate(&mut state, Vec2::new(f32::MAX, -f32::MAX));
        assert_eq!(state.pos(), Vec2::new(750.0, 0.0));
        assert!(state.in_bounds());
    }
}
