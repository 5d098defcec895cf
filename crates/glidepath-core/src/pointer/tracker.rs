use std::time::Duration;

use tracing::{debug, trace};

use super::deflection::bounded_offset;
use super::target::{PointerState, TargetHandle, TargetOffset, TargetSpec};
use crate::config::PointerConfig;
use crate::geometry::{GeometryProbe, Point};
use crate::motion::SpringState;

#[derive(Debug, Clone)]
struct TrackedTarget {
    spec: TargetSpec,
    max_deflection: f64,
    /// Anchor center as of the last measurement; `None` when unmeasurable
    anchor: Option<Point>,
    /// Spring target, recomputed on every pointer event and frame
    raw: Point,
    spring: SpringState,
}

impl TrackedTarget {
    fn retarget(&mut self, pointer: Option<PointerState>) {
        self.raw = match (pointer, self.anchor) {
            (Some(pointer), Some(anchor)) => {
                bounded_offset(pointer.position, anchor, self.max_deflection)
            }
            _ => Point::ZERO,
        };
    }

    fn remeasure(&mut self, probe: &dyn GeometryProbe) {
        self.anchor = probe
            .measure(&self.spec.element)
            .filter(|rect| !rect.is_degenerate())
            .map(|rect| rect.center());
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    target: Option<TrackedTarget>,
}

/// Registry of pointer-tracked targets sharing one pointer listener
///
/// Feed pointer moves through `on_pointer_move()` as they arrive and call
/// `frame()` once per rendered frame; read smoothed offsets with `offset_of()`.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    config: PointerConfig,
    slots: Vec<Slot>,
    free: Vec<u32>,
    pointer: Option<PointerState>,
    listening: bool,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(PointerConfig::default())
    }
}

impl PointerTracker {
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            free: Vec::new(),
            pointer: None,
            listening: false,
        }
    }

    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    /// Register a target and return its handle
    ///
    /// Animated targets are measured immediately; non-animated targets are
    /// never measured and always report a zero offset.
    pub fn register(&mut self, spec: TargetSpec, probe: &dyn GeometryProbe) -> TargetHandle {
        let max_deflection = self.config.size(spec.size).max_deflection;
        let mut target = TrackedTarget {
            spec,
            max_deflection,
            anchor: None,
            raw: Point::ZERO,
            spring: SpringState::REST,
        };
        if target.spec.animated {
            target.remeasure(probe);
            target.retarget(self.pointer);
        }

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let entry = &mut self.slots[slot as usize];
        entry.target = Some(target);
        let handle = TargetHandle {
            slot,
            generation: entry.generation,
        };

        if !self.listening {
            self.listening = true;
            debug!("Pointer listener attached");
        }
        if let Some(target) = &entry.target {
            debug!(
                handle = %handle,
                element = %target.spec.element,
                size = %target.spec.size,
                animated = target.spec.animated,
                "Registered pointer target"
            );
        }
        handle
    }

    /// Unregister a target; stale or repeated handles are ignored
    ///
    /// Returns whether a target was removed.
    pub fn unregister(&mut self, handle: TargetHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.slot as usize) else {
            return false;
        };
        if slot.generation != handle.generation || slot.target.is_none() {
            trace!(handle = %handle, "Ignoring unregister of stale handle");
            return false;
        }

        slot.target = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.slot);
        debug!(handle = %handle, "Unregistered pointer target");

        if self.is_empty() {
            self.listening = false;
            self.pointer = None;
            debug!("Pointer listener detached");
        }
        true
    }

    /// Record a pointer move and retarget every animated target
    ///
    /// Uses anchors cached from the last measurement; no geometry is read
    /// here. Ignored while no target is registered.
    pub fn on_pointer_move(&mut self, position: Point) {
        if !self.listening {
            return;
        }
        let pointer = Some(PointerState { position });
        self.pointer = pointer;
        for target in self.targets_mut().filter(|t| t.spec.animated) {
            target.retarget(pointer);
        }
    }

    /// Advance every animated target by one frame
    ///
    /// Anchors are re-measured, raw offsets recomputed from the latest
    /// pointer position, then springs stepped by `dt`.
    pub fn frame(&mut self, dt: Duration, probe: &dyn GeometryProbe) {
        let stiffness = self.config.spring_stiffness;
        let pointer = self.pointer;
        for target in self.targets_mut().filter(|t| t.spec.animated) {
            target.remeasure(probe);
            target.retarget(pointer);
            let mut next = target.spring.step(dt, target.raw, stiffness);
            next.position = next.position.clamp_length(target.max_deflection);
            target.spring = next;
        }
        trace!(dt_ms = dt.as_secs_f64() * 1000.0, "Stepped pointer springs");
    }

    /// Smoothed offset of a target; zero for disabled or invalid handles
    pub fn offset_of(&self, handle: TargetHandle) -> Point {
        self.resolve(handle)
            .filter(|t| t.spec.animated)
            .map(|t| t.spring.position)
            .unwrap_or(Point::ZERO)
    }

    /// Unsmoothed spring target of a target; zero for disabled or invalid handles
    pub fn raw_offset_of(&self, handle: TargetHandle) -> Point {
        self.resolve(handle)
            .filter(|t| t.spec.animated)
            .map(|t| t.raw)
            .unwrap_or(Point::ZERO)
    }

    /// Smoothed offsets of all registered targets
    pub fn offsets(&self) -> impl Iterator<Item = TargetOffset> + '_ {
        self.slots.iter().enumerate().filter_map(|(slot, entry)| {
            entry.target.as_ref().map(|target| TargetOffset {
                handle: TargetHandle {
                    slot: slot as u32,
                    generation: entry.generation,
                },
                element: target.spec.element.clone(),
                vector: if target.spec.animated {
                    target.spring.position
                } else {
                    Point::ZERO
                },
            })
        })
    }

    /// Enable or disable tracking for one target at runtime
    ///
    /// Disabling parks the spring at rest on the zero offset.
    pub fn set_animated(
        &mut self,
        handle: TargetHandle,
        animated: bool,
        probe: &dyn GeometryProbe,
    ) -> bool {
        let pointer = self.pointer;
        let Some(target) = self.resolve_mut(handle) else {
            return false;
        };
        if target.spec.animated == animated {
            return true;
        }

        target.spec.animated = animated;
        target.spring = SpringState::REST;
        if animated {
            target.remeasure(probe);
            target.retarget(pointer);
        } else {
            target.anchor = None;
            target.raw = Point::ZERO;
        }
        debug!(handle = %handle, animated, "Changed pointer target animation");
        true
    }

    /// Whether every animated spring has come to rest on its target
    pub fn is_settled(&self) -> bool {
        let epsilon = self.config.rest_epsilon;
        self.targets()
            .filter(|t| t.spec.animated)
            .all(|t| t.spring.is_settled(t.raw, epsilon))
    }

    pub fn contains(&self, handle: TargetHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Latest pointer position while the listener is attached
    pub fn pointer(&self) -> Option<PointerState> {
        self.pointer
    }

    #[inline]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn len(&self) -> usize {
        self.targets().count()
    }

    pub fn is_empty(&self) -> bool {
        self.targets().next().is_none()
    }

    fn resolve(&self, handle: TargetHandle) -> Option<&TrackedTarget> {
        self.slots
            .get(handle.slot as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.target.as_ref())
    }

    fn resolve_mut(&mut self, handle: TargetHandle) -> Option<&mut TrackedTarget> {
        self.slots
            .get_mut(handle.slot as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.target.as_mut())
    }

    fn targets(&self) -> impl Iterator<Item = &TrackedTarget> {
        self.slots.iter().filter_map(|slot| slot.target.as_ref())
    }

    fn targets_mut(&mut self) -> impl Iterator<Item = &mut TrackedTarget> {
        self.slots.iter_mut().filter_map(|slot| slot.target.as_mut())
    }
}
