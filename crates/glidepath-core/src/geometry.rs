//! Plane geometry and the probe through which the engine reads target layout.
//!
//! The engine never holds on to a host's widget or element references. Hosts
//! expose layout through [`GeometryProbe`], queried on demand, so tracking can
//! be driven by synthetic geometry in tests and by real layout in the terminal.

use std::collections::HashMap;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Identifier of a visual element known to the host
pub type ElementId = String;

/// A point (or vector) in host layout units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when treated as a vector
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector, with `atan2(0, 0) = 0`
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Scale the vector down so its length does not exceed `max`
    pub fn clamp_length(self, max: f64) -> Point {
        let max = max.max(0.0);
        let len = self.length();
        if len <= max || len == 0.0 {
            return self;
        }

        let mut scaled = if len.is_finite() {
            self * (max / len)
        } else {
            let angle = self.angle();
            Point::new(angle.cos() * max, angle.sin() * max)
        };
        // Rescaling can round a few ulps past the limit
        for _ in 0..8 {
            if scaled.length() <= max {
                return scaled;
            }
            scaled = scaled * (1.0 - f64::EPSILON);
        }
        // Subnormal limits do not shrink under rescaling
        if scaled.length() <= max {
            scaled
        } else {
            Point::ZERO
        }
    }

    pub fn lerp(self, to: Point, t: f64) -> Point {
        self + (to - self) * t
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle in host layout units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// A rect with no area (or non-finite extents) cannot anchor a target
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
    }
}

/// Reads the current position and size of a visual target on demand
pub trait GeometryProbe {
    /// Current bounds of `element`, or `None` when it is not laid out
    fn measure(&self, element: &str) -> Option<Rect>;
}

/// Probe backed by a fixed table of element bounds
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    rects: HashMap<ElementId, Rect>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, element: impl Into<ElementId>, rect: Rect) -> Self {
        self.set(element, rect);
        self
    }

    pub fn set(&mut self, element: impl Into<ElementId>, rect: Rect) {
        self.rects.insert(element.into(), rect);
    }

    pub fn remove(&mut self, element: &str) -> Option<Rect> {
        self.rects.remove(element)
    }
}

impl GeometryProbe for StaticProbe {
    fn measure(&self, element: &str) -> Option<Rect> {
        self.rects.get(element).copied()
    }
}
