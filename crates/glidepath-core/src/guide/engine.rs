use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::connector::{segments_of, SegmentState};
use super::mapper::BreakpointTable;
use super::steps::{active_step, focused_step, state_of, states_of, StepState};
use crate::config::GuideConfig;
use crate::error::{Error, Result};
use crate::geometry::Point;

/// Horizontal spacing of the default zig-zag pin layout
const DEFAULT_ANCHOR_DX: f64 = 24.0;
/// Vertical spacing of the default zig-zag pin layout
const DEFAULT_ANCHOR_DY: f64 = 8.0;

/// One step of the guide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDescriptor {
    pub id: String,
    pub title: String,
    /// Handed to the action sink untouched
    pub destination: String,
    pub params: Option<serde_json::Value>,
    /// Pin position in guide space
    pub anchor: Point,
}

impl StepDescriptor {
    pub fn new(id: impl Into<String>, destination: impl Into<String>, anchor: Point) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            destination: destination.into(),
            params: None,
            anchor,
        }
    }
}

/// Payload delivered when a step's call-to-action fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepAction {
    /// Id of the step that fired
    pub source_id: String,
    pub destination_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

/// Receiver of step actions, typically the host's navigation layer
pub trait ActionSink {
    fn on_step_action(&mut self, action: StepAction);
}

impl<F> ActionSink for F
where
    F: FnMut(StepAction),
{
    fn on_step_action(&mut self, action: StepAction) {
        self(action)
    }
}

/// Connector between two pins with its current state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentView {
    pub from: Point,
    pub to: Point,
    #[serde(flatten)]
    pub state: SegmentState,
}

/// Everything a renderer needs for one frame of the guide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideSnapshot {
    pub fraction: f64,
    pub coordinate: f64,
    pub steps: Vec<StepState>,
    pub segments: Vec<SegmentView>,
    pub active_step: Option<usize>,
    pub focused_step: usize,
}

/// Scroll-synchronized multi-step guide
///
/// Holds only static configuration; every snapshot is recomputed from the
/// scroll fraction alone.
#[derive(Debug, Clone)]
pub struct StepGuide {
    steps: Vec<StepDescriptor>,
    table: BreakpointTable,
}

impl StepGuide {
    pub fn new(steps: Vec<StepDescriptor>, table: BreakpointTable) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::InvalidStep("guide needs at least one step".to_string()));
        }

        let mut seen = HashSet::new();
        for step in &steps {
            if step.id.is_empty() {
                return Err(Error::InvalidStep("step id must not be empty".to_string()));
            }
            if !seen.insert(step.id.as_str()) {
                return Err(Error::InvalidStep(format!("duplicate step id '{}'", step.id)));
            }
        }

        let count = steps.len() as f64;
        if table.min_coordinate() < 0.0 || table.max_coordinate() > count {
            return Err(Error::InvalidBreakpoints(format!(
                "coordinates must stay within [0, {}], got [{}, {}]",
                count,
                table.min_coordinate(),
                table.max_coordinate()
            )));
        }

        Ok(Self { steps, table })
    }

    /// Build a guide from configuration, laying out missing anchors in a zig-zag
    pub fn from_config(config: &GuideConfig) -> Result<Self> {
        let steps = config
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| StepDescriptor {
                id: step.id.clone(),
                title: step.title.clone(),
                destination: step.destination.clone(),
                params: step.params.clone(),
                anchor: step
                    .anchor
                    .map(|[x, y]| Point::new(x, y))
                    .unwrap_or_else(|| default_anchor(i)),
            })
            .collect();
        let table = BreakpointTable::from_pairs(&config.breakpoints)?;
        Self::new(steps, table)
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&StepDescriptor> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn table(&self) -> &BreakpointTable {
        &self.table
    }

    /// Step coordinate for a scroll fraction; a missing source counts as 0
    pub fn coordinate_of(&self, fraction: Option<f64>) -> f64 {
        self.table.coordinate_of(fraction.unwrap_or(0.0))
    }

    pub fn state_of(&self, fraction: Option<f64>, index: usize) -> StepState {
        state_of(self.coordinate_of(fraction), index)
    }

    /// Full render state for a scroll fraction
    pub fn snapshot(&self, fraction: Option<f64>) -> GuideSnapshot {
        let fraction = sanitize_fraction(fraction);
        let coordinate = self.table.coordinate_of(fraction);
        let count = self.steps.len();

        let segments = self
            .steps
            .windows(2)
            .zip(segments_of(coordinate, count))
            .map(|(pair, state)| SegmentView {
                from: pair[0].anchor,
                to: pair[1].anchor,
                state,
            })
            .collect();

        GuideSnapshot {
            fraction,
            coordinate,
            steps: states_of(coordinate, count),
            segments,
            active_step: active_step(coordinate, count),
            focused_step: focused_step(coordinate, count),
        }
    }

    /// Fraction at which step `index` becomes active
    pub fn fraction_for_step(&self, index: usize) -> f64 {
        self.table.fraction_for(index as f64)
    }

    /// Fraction range over which step `index` is the active step
    pub fn step_range(&self, index: usize) -> (f64, f64) {
        (
            self.table.fraction_for(index as f64),
            self.table.fraction_for((index + 1) as f64),
        )
    }

    /// Fire the call-to-action of step `index`
    ///
    /// Pending and unknown steps are ignored. Returns whether the sink was called.
    pub fn trigger(&self, index: usize, fraction: Option<f64>, sink: &mut dyn ActionSink) -> bool {
        let Some(step) = self.steps.get(index) else {
            debug!(index, "Ignoring action for unknown step");
            return false;
        };
        if self.state_of(fraction, index) == StepState::Pending {
            debug!(step = %step.id, "Ignoring action for pending step");
            return false;
        }

        debug!(step = %step.id, destination = %step.destination, "Step action");
        sink.on_step_action(StepAction {
            source_id: step.id.clone(),
            destination_id: step.destination.clone(),
            params: step.params.clone(),
        });
        true
    }
}

fn sanitize_fraction(fraction: Option<f64>) -> f64 {
    match fraction {
        Some(f) if f.is_finite() => f.clamp(0.0, 1.0),
        Some(f) if f == f64::INFINITY => 1.0,
        _ => 0.0,
    }
}

fn default_anchor(index: usize) -> Point {
    let x = if index % 2 == 0 { 0.0 } else { DEFAULT_ANCHOR_DX };
    Point::new(x, index as f64 * DEFAULT_ANCHOR_DY)
}
