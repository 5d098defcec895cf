//! Scroll-synchronized step guide
//!
//! Every value here is a pure function of the scroll fraction:
//!
//! - `mapper` - fraction to continuous step coordinate (breakpoint table)
//! - `steps` - coordinate to pending / active / complete per step
//! - `connector` - coordinate to per-segment draw fraction and pulse
//! - `engine` - `StepGuide`, tying the above to step descriptors and actions

pub mod connector;
pub mod engine;
pub mod mapper;
pub mod steps;

pub use connector::{path_point, pulse_phase, segment_state_of, segments_of, SegmentState};
pub use engine::{ActionSink, GuideSnapshot, SegmentView, StepAction, StepDescriptor, StepGuide};
pub use mapper::{coordinate_of, BreakpointTable};
pub use steps::{active_step, focused_step, state_of, states_of, StepState};
