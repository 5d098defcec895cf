use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{ElementId, Point};

/// Size class of a tracked element; selects deflection radius and diameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePreset {
    Sm,
    #[default]
    Md,
    Lg,
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SizePreset::Sm => "sm",
            SizePreset::Md => "md",
            SizePreset::Lg => "lg",
        };
        f.write_str(name)
    }
}

impl FromStr for SizePreset {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sm" | "small" => Ok(SizePreset::Sm),
            "md" | "medium" => Ok(SizePreset::Md),
            "lg" | "large" => Ok(SizePreset::Lg),
            other => Err(crate::Error::Other(format!(
                "unknown size '{}', expected sm, md or lg",
                other
            ))),
        }
    }
}

/// Registration request for a tracked element
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSpec {
    /// Element whose bounds anchor the target
    pub element: ElementId,
    pub size: SizePreset,
    /// `false` turns the target into a fixed zero offset (reduced motion)
    pub animated: bool,
}

impl TargetSpec {
    pub fn new(element: impl Into<ElementId>, size: SizePreset) -> Self {
        Self {
            element: element.into(),
            size,
            animated: true,
        }
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}

/// Generational handle to a registered target
///
/// A handle stops resolving the moment its target is unregistered, even if
/// the slot is later reused by another registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetHandle {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for TargetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.slot, self.generation)
    }
}

/// Latest pointer position, shared read-only with every target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub position: Point,
}

/// Smoothed offset of one target for the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct TargetOffset {
    pub handle: TargetHandle,
    pub element: ElementId,
    pub vector: Point,
}
