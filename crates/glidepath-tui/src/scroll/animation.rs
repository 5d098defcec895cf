//! Scroll fraction animation controller

use std::time::{Duration, Instant};

use glidepath_core::motion::EasingTypeExt;
use glidepath_core::EasingType;

use super::config::{ScrollConfig, ScrollConfigExt};
use super::timing::{is_complete, lerp, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Eases the guide's scroll fraction toward a target
///
/// Call `scroll_to()` / `scroll_by()` from input handlers, then `update()` once
/// per frame to get the fraction handed to the guide. Deltas arriving between
/// frames are batched into a single animation.
#[derive(Debug, Clone)]
pub struct FractionAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Visible fraction, always in [0, 1]
    current: f64,
    pending_delta: f64,
}

impl Default for FractionAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl FractionAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
            pending_delta: 0.0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Fraction moved by one scroll step
    pub fn step(&self) -> f64 {
        self.config.scroll_step
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the next frame will move the fraction
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0.0
    }

    /// Final fraction once the current animation and any batched deltas settle
    pub fn target(&self) -> f64 {
        clamp_fraction(self.animation_target() + self.pending_delta)
    }

    fn animation_target(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Jump to a fraction without animating
    pub fn set(&mut self, fraction: f64) {
        self.animation = None;
        self.pending_delta = 0.0;
        self.current = clamp_fraction(fraction);
    }

    /// Animate toward `fraction`, or jump when smooth scrolling is off
    pub fn scroll_to(&mut self, fraction: f64) {
        self.scroll_to_at(fraction, Instant::now());
    }

    fn scroll_to_at(&mut self, fraction: f64, now: Instant) {
        let target = clamp_fraction(fraction);
        self.pending_delta = 0.0;

        if !self.config.is_smooth() {
            self.current = target;
            self.animation = None;
            return;
        }
        if (self.current - target).abs() < f64::EPSILON {
            self.animation = None;
            return;
        }
        self.start_animation(target, now);
    }

    /// Move by `delta` (positive scrolls forward); batched until the next update
    pub fn scroll_by(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        if !self.config.is_smooth() {
            self.current = clamp_fraction(self.current + delta);
            self.animation = None;
            return;
        }
        self.pending_delta += delta;
    }

    /// Advance the animation and return the visible fraction
    pub fn update(&mut self) -> f64 {
        self.update_at(Instant::now())
    }

    pub fn update_at(&mut self, now: Instant) -> f64 {
        if self.pending_delta != 0.0 {
            let target = self.target();
            self.pending_delta = 0.0;
            if (target - self.current).abs() >= f64::EPSILON {
                self.start_animation(target, now);
            }
        }

        if let Some(anim) = &self.animation {
            if is_complete(anim.start, now, anim.duration) {
                self.current = anim.to;
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, now, anim.duration));
                self.current = clamp_fraction(lerp(anim.from, anim.to, t));
            }
        }

        self.current
    }

    fn start_animation(&mut self, to: f64, now: Instant) {
        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }
}

fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}
