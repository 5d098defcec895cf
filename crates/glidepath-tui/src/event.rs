use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Events drained in one batch before yielding a frame
const MAX_BATCH: usize = 64;

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Pointer moved, dragged, or wheel scrolled
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// No input before the deadline
    Tick,
}

/// Event handler for terminal events
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Wait up to `timeout` for input, then drain whatever else is queued
    ///
    /// Returns `[Tick]` when nothing arrived in time.
    pub fn next_batch(&self, timeout: Duration) -> Result<Vec<AppEvent>> {
        if !event::poll(timeout)? {
            return Ok(vec![AppEvent::Tick]);
        }

        let mut events = Vec::new();
        loop {
            if let Some(event) = translate(event::read()?) {
                events.push(event);
            }
            if events.len() >= MAX_BATCH || !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(events)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a raw terminal event to an application event
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release events
        // (crossterm 0.27+ sends release events on some systems)
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Frame pacing: idle tick rate, or animation FPS while something moves
///
/// Input only updates state; frames are produced when the clock says so, so
/// a burst of pointer events never steps the springs more than once per frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_rate: Duration,
    animation_tick: Duration,
    last_frame: Instant,
}

/// Shortest frame period, so a zero setting cannot busy-poll
const MIN_PERIOD: Duration = Duration::from_millis(1);

impl FrameClock {
    pub fn new(tick_rate: Duration, animation_tick: Duration) -> Self {
        Self {
            tick_rate: tick_rate.max(MIN_PERIOD),
            animation_tick: animation_tick.max(MIN_PERIOD),
            last_frame: Instant::now(),
        }
    }

    pub fn period(&self, animating: bool) -> Duration {
        if animating {
            self.animation_tick
        } else {
            self.tick_rate
        }
    }

    /// Time left until the next frame is due
    pub fn timeout(&self, animating: bool) -> Duration {
        self.timeout_at(animating, Instant::now())
    }

    pub fn timeout_at(&self, animating: bool, now: Instant) -> Duration {
        self.period(animating)
            .saturating_sub(now.saturating_duration_since(self.last_frame))
    }

    pub fn is_due(&self, animating: bool) -> bool {
        self.is_due_at(animating, Instant::now())
    }

    pub fn is_due_at(&self, animating: bool, now: Instant) -> bool {
        now.saturating_duration_since(self.last_frame) >= self.period(animating)
    }

    /// Start a new frame; returns the time since the previous one
    pub fn start_frame(&mut self) -> Duration {
        self.start_frame_at(Instant::now())
    }

    pub fn start_frame_at(&mut self, now: Instant) -> Duration {
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, MouseEventKind};

    #[test]
    fn test_translate_ignores_key_release() {
        let press = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(translate(Event::Key(press)), Some(AppEvent::Key(press)));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert_eq!(translate(Event::Key(release)), None);
        assert_eq!(translate(Event::FocusGained), None);
    }

    #[test]
    fn test_translate_mouse_and_resize() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 1,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(translate(Event::Mouse(mouse)), Some(AppEvent::Mouse(mouse)));
        assert_eq!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize(80, 24)));
    }

    #[test]
    fn test_frame_clock_pacing() {
        let mut clock = FrameClock::new(Duration::from_millis(100), Duration::from_millis(16));
        let start = Instant::now();
        clock.start_frame_at(start);

        let later = start + Duration::from_millis(20);
        assert!(clock.is_due_at(true, later));
        assert!(!clock.is_due_at(false, later));
        assert_eq!(clock.timeout_at(false, later), Duration::from_millis(80));
        assert_eq!(clock.timeout_at(true, later), Duration::ZERO);

        assert_eq!(clock.start_frame_at(later), Duration::from_millis(20));
        assert!(!clock.is_due_at(true, later));
    }

    #[test]
    fn test_frame_clock_zero_period_still_waits() {
        let mut clock = FrameClock::new(Duration::ZERO, Duration::ZERO);
        assert_eq!(clock.period(false), Duration::from_millis(1));
        assert_eq!(clock.period(true), Duration::from_millis(1));

        let start = Instant::now();
        clock.start_frame_at(start);
        assert!(!clock.is_due_at(false, start));
        assert_eq!(clock.timeout_at(false, start), Duration::from_millis(1));
    }
}
