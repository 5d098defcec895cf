//! Critically damped spring integrator
//!
//! Uses the closed-form solution of `x'' = -k (x - target) - 2 sqrt(k) x'` over a
//! step of `dt`, so the update is exact and stable for any frame length. The
//! target is held constant across a single step.

use std::time::Duration;

use crate::geometry::Point;

/// Position and velocity of a 2D spring
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpringState {
    pub position: Point,
    pub velocity: Point,
}

impl SpringState {
    pub const REST: SpringState = SpringState {
        position: Point::ZERO,
        velocity: Point::ZERO,
    };

    pub fn at(position: Point) -> Self {
        Self {
            position,
            velocity: Point::ZERO,
        }
    }

    /// Advance the spring by `dt` toward `target`
    ///
    /// `dt = 0` returns the state unchanged. A non-positive or non-finite
    /// stiffness snaps straight to the target.
    pub fn step(self, dt: Duration, target: Point, stiffness: f64) -> SpringState {
        let dt = dt.as_secs_f64();
        if dt == 0.0 {
            return self;
        }
        if !(stiffness.is_finite() && stiffness > 0.0) {
            return SpringState::at(target);
        }

        let omega = stiffness.sqrt();
        let decay = (-omega * dt).exp();
        let (x, vx) = step_axis(self.position.x - target.x, self.velocity.x, omega, dt, decay);
        let (y, vy) = step_axis(self.position.y - target.y, self.velocity.y, omega, dt, decay);

        SpringState {
            position: Point::new(target.x + x, target.y + y),
            velocity: Point::new(vx, vy),
        }
    }

    /// Whether the spring sits within `epsilon` of `target` and is nearly still
    pub fn is_settled(&self, target: Point, epsilon: f64) -> bool {
        (self.position - target).length() <= epsilon && self.velocity.length() <= epsilon
    }
}

/// One axis of the critically damped solution, displacement relative to the target
#[inline]
fn step_axis(x0: f64, v0: f64, omega: f64, dt: f64, decay: f64) -> (f64, f64) {
    let c = v0 + omega * x0;
    let x = (x0 + c * dt) * decay;
    let v = (v0 - omega * c * dt) * decay;
    (x, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_zero_dt_is_identity() {
        let state = SpringState {
            position: Point::new(3.0, -2.0),
            velocity: Point::new(1.0, 1.0),
        };
        assert_eq!(state.step(Duration::ZERO, Point::new(10.0, 10.0), 170.0), state);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let target = Point::new(40.0, 0.0);
        let mut state = SpringState::REST;
        let mut prev_x = 0.0;
        for _ in 0..120 {
            state = state.step(FRAME, target, 170.0);
            assert!(state.position.x <= target.x + 1e-9, "overshot: {}", state.position.x);
            assert!(state.position.x >= prev_x - 1e-9, "moved backwards");
            prev_x = state.position.x;
        }
        assert!(state.is_settled(target, 0.01));
    }

    #[test]
    fn test_lags_behind_target() {
        let target = Point::new(10.0, 5.0);
        let state = SpringState::REST.step(FRAME, target, 170.0);
        assert!(state.position.x > 0.0 && state.position.x < target.x);
        assert!(state.position.y > 0.0 && state.position.y < target.y);
    }

    #[test]
    fn test_step_size_independence() {
        let target = Point::new(8.0, 0.0);
        let one = SpringState::REST.step(Duration::from_millis(32), target, 170.0);
        let two = SpringState::REST
            .step(FRAME, target, 170.0)
            .step(FRAME, target, 170.0);
        assert!((one.position.x - two.position.x).abs() < 1e-9);
        assert!((one.velocity.x - two.velocity.x).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_stiffness_snaps() {
        let target = Point::new(1.0, 2.0);
        let state = SpringState::REST.step(FRAME, target, 0.0);
        assert_eq!(state, SpringState::at(target));
    }
}
