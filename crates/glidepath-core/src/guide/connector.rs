//! Connector segments between adjacent steps
//!
//! Segment `i` joins step `i` to step `i + 1`. It starts drawing once step `i`
//! is complete and finishes exactly when step `i + 1` completes. While step
//! `i + 1` is active a pulse travels along it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::steps::{state_of, StepState};
use crate::config::EasingType;
use crate::geometry::Point;
use crate::motion::EasingTypeExt;

/// Draw progress and pulse visibility of one connector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentState {
    /// Portion of the connector drawn, in [0, 1]
    pub draw_fraction: f64,
    pub pulse_visible: bool,
}

/// State of the segment leaving step `index` at `coordinate`
pub fn segment_state_of(coordinate: f64, index: usize) -> SegmentState {
    let start = (index + 1) as f64;
    let draw_fraction = if coordinate.is_nan() {
        0.0
    } else {
        (coordinate - start).clamp(0.0, 1.0)
    };
    SegmentState {
        draw_fraction,
        pulse_visible: state_of(coordinate, index + 1) == StepState::Active,
    }
}

/// States of the `count - 1` segments of a `count`-step guide
pub fn segments_of(coordinate: f64, count: usize) -> Vec<SegmentState> {
    (0..count.saturating_sub(1))
        .map(|i| segment_state_of(coordinate, i))
        .collect()
}

/// Phase of the repeating pulse traversal after `elapsed`, in [0, 1)
pub fn pulse_phase(elapsed: Duration, period: Duration, easing: EasingType) -> f64 {
    if period.is_zero() {
        return 0.0;
    }
    let cycles = elapsed.as_secs_f64() / period.as_secs_f64();
    let phase = easing.apply(cycles.fract());
    // Easing can round up to exactly 1 near the end of a cycle
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}

/// Point at parameter `t` along the connector from `from` to `to`
///
/// The connector is a cubic Bezier whose control points leave each pin
/// vertically, half way toward the other pin.
pub fn path_point(from: Point, to: Point, t: f64) -> Point {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let mid_y = (from.y + to.y) / 2.0;
    let c1 = Point::new(from.x, mid_y);
    let c2 = Point::new(to.x, mid_y);

    let u = 1.0 - t;
    from * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + to * (t * t * t)
}
