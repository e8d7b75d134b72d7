//! Ball state and the bounds it lives in

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Per-axis "away from border" flags.
///
/// A flag becomes true on any step that leaves the ball strictly inside the
/// range for that axis, and false when the ball is clamped. A haptic pulse is
/// owed only when a clamp happens while the flag is still true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BorderContact {
    pub away_x: bool,
    pub away_y: bool,
}

/// Complete simulation state for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    /// Top-left corner of the sprite, origin at top-left of the surface
    pos: Vec2,
    /// Accumulated acceleration, added to `pos` every step
    vel: Vec2,
    contact: BorderContact,
    /// Drawable surface size in pixels
    surface: Vec2,
    /// Sprite size in pixels
    sprite: Vec2,
}

impl SimState {
    /// Create a state at rest. `start` is clamped into the allowed range.
    pub fn new(surface: Vec2, sprite: Vec2, start: Vec2) -> Self {
        let max = max_position(surface, sprite);
        Self {
            pos: start.clamp(Vec2::ZERO, max),
            vel: Vec2::ZERO,
            contact: BorderContact::default(),
            surface,
            sprite,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    pub fn contact(&self) -> BorderContact {
        self.contact
    }

    pub fn surface(&self) -> Vec2 {
        self.surface
    }

    pub fn sprite(&self) -> Vec2 {
        self.sprite
    }

    /// Largest allowed position on each axis (`surface - sprite`, floored at 0)
    #[inline]
    pub fn max_pos(&self) -> Vec2 {
        max_position(self.surface, self.sprite)
    }

    /// Whether the position lies inside `[0, max_pos]` on both axes
    pub fn in_bounds(&self) -> bool {
        let max = self.max_pos();
        self.pos.x >= 0.0 && self.pos.y >= 0.0 && self.pos.x <= max.x && self.pos.y <= max.y
    }

    /// Mutable access for the integrator
    pub(super) fn parts_mut(&mut self) -> (&mut Vec2, &mut Vec2, &mut BorderContact) {
        (&mut self.pos, &mut self.vel, &mut self.contact)
    }
}

/// A sprite larger than the surface collapses that axis to `[0, 0]`
#[inline]
fn max_position(surface: Vec2, sprite: Vec2) -> Vec2 {
    (surface - sprite).max(Vec2::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_at_rest() {
        let state = SimState::new(
            Vec2::new(800.0, 480.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(10.0, 10.0),
        );
        assert_eq!(state.pos(), Vec2::new(10.0, 10.0));
        assert_eq!(state.vel(), Vec2::ZERO);
        assert_eq!(state.contact(), BorderContact::default());
        assert_eq!(state.max_pos(), Vec2::new(750.0, 430.0));
        assert!(state.in_bounds());
    }

    #[test]
    fn test_start_clamped_into_range() {
        let state = SimState::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(90.0, -5.0),
        );
        assert_eq!(state.pos(), Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_oversized_sprite_collapses_axis() {
        let state = SimState::new(
            Vec2::new(40.0, 480.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(10.0, 10.0),
        );
        assert_eq!(state.max_pos(), Vec2::new(0.0, 430.0));
        assert_eq!(state.pos().x, 0.0);
        assert!(state.in_bounds());
    }
}
