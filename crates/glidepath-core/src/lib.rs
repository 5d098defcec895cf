pub mod config;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod pointer;
pub mod guide;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use geometry::{ElementId, GeometryProbe, Point, Rect, StaticProbe};
pub use guide::{ActionSink, GuideSnapshot, StepAction, StepDescriptor, StepGuide, StepState};
pub use pointer::{PointerTracker, SizePreset, TargetHandle, TargetSpec};
