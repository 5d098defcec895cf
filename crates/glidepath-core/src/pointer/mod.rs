//! Pointer vector tracking
//!
//! Tracked targets lean toward the pointer, bounded by a per-size deflection
//! radius. Raw offsets follow every pointer event; rendered offsets trail them
//! through a critically damped spring stepped once per frame.

mod deflection;
mod target;
mod tracker;

pub use deflection::bounded_offset;
pub use target::{PointerState, SizePreset, TargetHandle, TargetOffset, TargetSpec};
pub use tracker::PointerTracker;
