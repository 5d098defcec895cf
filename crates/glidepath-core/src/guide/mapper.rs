//! Scroll fraction to step coordinate mapping
//!
//! A breakpoint table is an ordered list of `(fraction, coordinate)` control
//! points. The mapping interpolates linearly between the bracketing pair and
//! clamps outside the table's domain. It carries no state, so a fraction maps
//! to the same coordinate whichever way the page was scrolled to reach it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Map a scroll fraction to a step coordinate through `breakpoints`
///
/// Tolerates malformed tables: an empty table maps everything to 0, and a
/// NaN fraction is treated as the domain minimum.
pub fn coordinate_of(fraction: f64, breakpoints: &[(f64, f64)]) -> f64 {
    let (Some(&(first_f, first_c)), Some(&(last_f, last_c))) =
        (breakpoints.first(), breakpoints.last())
    else {
        return 0.0;
    };

    if fraction.is_nan() || fraction <= first_f {
        return first_c;
    }
    if fraction >= last_f {
        return last_c;
    }

    for pair in breakpoints.windows(2) {
        let (f0, c0) = pair[0];
        let (f1, c1) = pair[1];
        if fraction <= f1 {
            let span = f1 - f0;
            if span <= 0.0 {
                return c1;
            }
            return c0 + (c1 - c0) * (fraction - f0) / span;
        }
    }
    last_c
}

/// Validated breakpoint table
///
/// Fractions strictly increase and coordinates never decrease, which makes
/// the mapping monotonic and continuous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct BreakpointTable {
    points: Vec<(f64, f64)>,
}

impl BreakpointTable {
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InvalidBreakpoints(
                "table needs at least one point".to_string(),
            ));
        }
        if let Some((f, c)) = points.iter().find(|(f, c)| !f.is_finite() || !c.is_finite()) {
            return Err(Error::InvalidBreakpoints(format!(
                "non-finite point ({}, {})",
                f, c
            )));
        }
        for pair in points.windows(2) {
            let (f0, c0) = pair[0];
            let (f1, c1) = pair[1];
            if f1 <= f0 {
                return Err(Error::InvalidBreakpoints(format!(
                    "fractions must strictly increase ({} then {})",
                    f0, f1
                )));
            }
            if c1 < c0 {
                return Err(Error::InvalidBreakpoints(format!(
                    "coordinates must not decrease ({} then {})",
                    c0, c1
                )));
            }
        }
        Ok(Self { points })
    }

    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self> {
        Self::new(pairs.iter().map(|p| (p[0], p[1])).collect())
    }

    /// Evenly spaced table reaching coordinate `steps` at fraction 1
    pub fn uniform(steps: usize) -> Self {
        let n = steps.max(1);
        let points = (0..=n)
            .map(|i| (i as f64 / n as f64, i as f64))
            .collect();
        Self { points }
    }

    pub fn coordinate_of(&self, fraction: f64) -> f64 {
        coordinate_of(fraction, &self.points)
    }

    /// Smallest fraction whose coordinate reaches `coordinate`
    ///
    /// Coordinates below the table's range give the domain minimum; above
    /// it, the domain maximum.
    pub fn fraction_for(&self, coordinate: f64) -> f64 {
        let (first_f, first_c) = self.points[0];
        let (last_f, _) = self.points[self.points.len() - 1];
        if coordinate.is_nan() || coordinate <= first_c {
            return first_f;
        }

        for pair in self.points.windows(2) {
            let (f0, c0) = pair[0];
            let (f1, c1) = pair[1];
            if coordinate <= c1 {
                if c1 == c0 {
                    return f0;
                }
                return f0 + (f1 - f0) * (coordinate - c0) / (c1 - c0);
            }
        }
        last_f
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn min_coordinate(&self) -> f64 {
        self.points[0].1
    }

    pub fn max_coordinate(&self) -> f64 {
        self.points[self.points.len() - 1].1
    }
}

impl TryFrom<Vec<[f64; 2]>> for BreakpointTable {
    type Error = Error;

    fn try_from(pairs: Vec<[f64; 2]>) -> Result<Self> {
        Self::from_pairs(&pairs)
    }
}

impl From<BreakpointTable> for Vec<[f64; 2]> {
    fn from(table: BreakpointTable) -> Self {
        table.points.into_iter().map(|(f, c)| [f, c]).collect()
    }
}
