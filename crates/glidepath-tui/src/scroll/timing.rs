//! Time calculation utilities for scroll animations

use std::time::{Duration, Instant};

/// Animation progress in [0.0, 1.0] at `now` for an animation begun at `start`
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 1.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.2, 0.4, 0.5) - 0.3).abs() < 0.001);
        assert!((lerp(1.0, 0.0, 1.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let duration = Duration::from_millis(100);
        assert_eq!(progress(start, start, duration), 0.0);
        assert!((progress(start, start + Duration::from_millis(50), duration) - 0.5).abs() < 1e-9);
        assert_eq!(progress(start, start + Duration::from_secs(1), duration), 1.0);
        assert!(is_complete(start, start + duration, duration));
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }
}
