use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use glidepath_core::guide::{focused_step, pulse_phase};
use glidepath_core::{
    AppConfig, GuideSnapshot, Point, PointerTracker, StepAction, StepGuide,
    TargetHandle, TargetSpec,
};
use tracing::{debug, info};

use crate::input::Action;
use crate::probe::{cell_center, LayoutProbe};
use crate::scroll::FractionAnimator;
use crate::theme::Theme;

/// Element id of the left eye
pub const EYE_LEFT: &str = "eye-left";
/// Element id of the right eye
pub const EYE_RIGHT: &str = "eye-right";

/// Scroll steps moved by one page
const PAGE_STEPS: f64 = 5.0;

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Application state
pub struct App {
    /// Configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub guide: StepGuide,
    /// Pointer-tracked eyes in the header
    pub tracker: PointerTracker,
    /// Element bounds from the last drawn frame
    pub probe: LayoutProbe,
    pub eyes: [TargetHandle; 2],
    /// Scroll source of the guide
    pub scroll: FractionAnimator,
    /// Fraction shown by the current frame
    pub fraction: f64,
    pub reduced_motion: bool,
    pub mode: Mode,
    /// First 'g' of a "gg" sequence was pressed
    pub pending_g: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Step actions fired this session, newest last
    pub actions: Vec<StepAction>,
    started: Instant,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Result<Self> {
        let guide = StepGuide::from_config(&config.guide).context("Invalid guide configuration")?;
        let reduced_motion = config.ui.reduced_motion;

        // Nothing is laid out yet; anchors are measured on the first frame
        let probe = LayoutProbe::new();
        let mut tracker = PointerTracker::new(config.pointer.clone());
        let eyes = [EYE_LEFT, EYE_RIGHT].map(|element| {
            tracker.register(
                TargetSpec::new(element, config.ui.eye_size).animated(!reduced_motion),
                &probe,
            )
        });

        Ok(Self {
            scroll: FractionAnimator::new(config.ui.scroll.clone()),
            config,
            theme,
            guide,
            tracker,
            probe,
            eyes,
            fraction: 0.0,
            reduced_motion,
            mode: Mode::Normal,
            pending_g: false,
            should_quit: false,
            status_message: None,
            actions: Vec::new(),
            started: Instant::now(),
        })
    }

    /// Apply an input action
    pub fn apply(&mut self, action: Action) {
        if action == Action::PendingG {
            self.pending_g = true;
            return;
        }
        self.pending_g = false;

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown | Action::WheelDown => self.scroll.scroll_by(self.scroll.step()),
            Action::ScrollUp | Action::WheelUp => self.scroll.scroll_by(-self.scroll.step()),
            Action::PageDown => self.scroll.scroll_by(self.scroll.step() * PAGE_STEPS),
            Action::PageUp => self.scroll.scroll_by(-self.scroll.step() * PAGE_STEPS),
            Action::JumpToTop => self.scroll.scroll_to(0.0),
            Action::JumpToBottom => self.scroll.scroll_to(1.0),
            Action::NextStep => self.next_step(),
            Action::PrevStep => self.prev_step(),
            Action::Trigger => {
                self.trigger_focused();
            }
            Action::ToggleMotion => self.toggle_motion(),
            Action::ShowHelp => self.mode = Mode::Help,
            Action::ExitMode => self.mode = Mode::Normal,
            Action::PointerMove { column, row } => {
                self.tracker.on_pointer_move(cell_center(column, row));
            }
            Action::PendingG | Action::None => {}
        }
    }

    /// Advance one rendered frame: scroll animation, then pointer springs
    pub fn tick(&mut self, dt: Duration) {
        self.fraction = self.scroll.update();
        self.tracker.frame(dt, &self.probe);
    }

    /// Guide state for the current frame
    pub fn snapshot(&self) -> GuideSnapshot {
        self.guide.snapshot(Some(self.fraction))
    }

    /// Phase of the connector pulse, `None` with reduced motion
    pub fn pulse_phase(&self) -> Option<f64> {
        if self.reduced_motion {
            return None;
        }
        Some(pulse_phase(
            self.started.elapsed(),
            Duration::from_millis(self.config.ui.pulse_period_ms),
            self.config.ui.pulse_easing,
        ))
    }

    /// Smoothed offset of eye `index` (0 = left, 1 = right)
    pub fn eye_offset(&self, index: usize) -> Point {
        self.eyes
            .get(index)
            .map(|handle| self.tracker.offset_of(*handle))
            .unwrap_or(Point::ZERO)
    }

    /// Whether frames should run at the animation rate
    pub fn needs_animation(&self) -> bool {
        if self.scroll.needs_update() || !self.tracker.is_settled() {
            return true;
        }
        !self.reduced_motion
            && self
                .snapshot()
                .segments
                .iter()
                .any(|segment| segment.state.pulse_visible)
    }

    /// Fire the focused step's action; returns whether anything fired
    pub fn trigger_focused(&mut self) -> bool {
        let index = self.snapshot().focused_step;
        let mut fired = Vec::new();
        let triggered = self
            .guide
            .trigger(index, Some(self.fraction), &mut |action: StepAction| {
                fired.push(action)
            });

        for action in fired {
            info!(
                source = %action.source_id,
                destination = %action.destination_id,
                "Navigating"
            );
            self.set_status(format!("→ {}", action.destination_id));
            self.actions.push(action);
        }
        if !triggered {
            self.set_status("Step not reached yet");
        }
        triggered
    }

    pub fn toggle_motion(&mut self) {
        self.reduced_motion = !self.reduced_motion;
        for handle in self.eyes {
            self.tracker
                .set_animated(handle, !self.reduced_motion, &self.probe);
        }
        debug!(reduced_motion = self.reduced_motion, "Toggled motion");
        self.set_status(if self.reduced_motion {
            "Reduced motion on"
        } else {
            "Reduced motion off"
        });
    }

    /// Scroll to the start of the step after the one in focus
    fn next_step(&mut self) {
        let count = self.guide.len();
        let coordinate = self.guide.coordinate_of(Some(self.scroll.target()));
        if coordinate >= count as f64 {
            return;
        }
        let next = (focused_step(coordinate, count) + 1).min(count);
        self.scroll.scroll_to(self.guide.fraction_for_step(next));
    }

    /// Scroll back to the start of the focused step, or the one before it
    fn prev_step(&mut self) {
        let count = self.guide.len();
        let target = self.scroll.target();
        let index = focused_step(self.guide.coordinate_of(Some(target)), count);
        let start = self.guide.fraction_for_step(index);
        if target > start + 1e-9 {
            self.scroll.scroll_to(start);
        } else if index > 0 {
            self.scroll.scroll_to(self.guide.fraction_for_step(index - 1));
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glidepath_core::config::ScrollConfig;
    use ratatui::layout::Rect as CellRect;

    fn instant_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.ui.scroll = ScrollConfig {
            smooth_enabled: false,
            ..ScrollConfig::default()
        };
        config
    }

    fn app_with(config: AppConfig) -> App {
        App::new(Arc::new(config), Theme::default()).unwrap()
    }

    #[test]
    fn test_new_registers_eyes() {
        let app = app_with(AppConfig::default());
        assert_eq!(app.tracker.len(), 2);
        assert!(app.eyes.iter().all(|h| app.tracker.contains(*h)));
        assert_eq!(app.eye_offset(0), Point::ZERO);
        assert_eq!(app.guide.len(), 4);
    }

    #[test]
    fn test_scroll_actions_move_fraction() {
        let mut app = app_with(instant_config());
        app.apply(Action::ScrollDown);
        app.tick(Duration::from_millis(16));
        assert!((app.fraction - 0.02).abs() < 1e-9);

        app.apply(Action::JumpToBottom);
        app.tick(Duration::from_millis(16));
        assert_eq!(app.fraction, 1.0);
        assert_eq!(app.snapshot().active_step, None);

        app.apply(Action::PendingG);
        assert!(app.pending_g);
        app.apply(Action::JumpToTop);
        assert!(!app.pending_g);
        app.tick(Duration::from_millis(16));
        assert_eq!(app.fraction, 0.0);
    }

    #[test]
    fn test_step_navigation() {
        let mut app = app_with(instant_config());
        app.apply(Action::NextStep);
        assert!((app.scroll.target() - 0.15).abs() < 1e-9);

        app.apply(Action::NextStep);
        assert!((app.scroll.target() - 0.3).abs() < 1e-9);

        app.apply(Action::ScrollDown);
        app.apply(Action::PrevStep);
        assert!((app.scroll.target() - 0.3).abs() < 1e-9);
        app.apply(Action::PrevStep);
        assert!((app.scroll.target() - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_step_navigation_sees_unflushed_scroll() {
        let mut app = app_with(AppConfig::default());
        assert!(app.scroll.config().smooth_enabled);

        for _ in 0..10 {
            app.apply(Action::PageDown);
        }
        assert!((app.scroll.target() - 1.0).abs() < 1e-9);
        app.apply(Action::PrevStep);
        assert!((app.scroll.target() - 0.45).abs() < 1e-9);
        assert!(app.scroll.is_animating());

        let mut app = app_with(AppConfig::default());
        app.apply(Action::PageDown);
        app.apply(Action::PageDown);
        app.apply(Action::NextStep);
        assert!((app.scroll.target() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_next_step_stops_after_last() {
        let mut app = app_with(instant_config());
        app.apply(Action::JumpToBottom);
        app.apply(Action::NextStep);
        assert_eq!(app.scroll.target(), 1.0);
    }

    #[test]
    fn test_trigger_focused_records_action() {
        let mut app = app_with(instant_config());
        assert!(app.trigger_focused());
        assert_eq!(app.actions.len(), 1);
        assert_eq!(app.actions[0].source_id, "create-account");
        assert_eq!(app.actions[0].destination_id, "signup");
        assert_eq!(app.status_message.as_deref(), Some("→ signup"));
    }

    #[test]
    fn test_pointer_moves_eyes_after_frames() {
        let mut app = app_with(instant_config());
        app.probe.place(EYE_LEFT, CellRect::new(10, 1, 10, 5));
        app.probe.place(EYE_RIGHT, CellRect::new(30, 1, 10, 5));

        app.apply(Action::PointerMove { column: 70, row: 3 });
        assert_eq!(app.eye_offset(0), Point::ZERO);

        for _ in 0..120 {
            app.tick(Duration::from_millis(16));
        }
        let offset = app.eye_offset(0);
        assert!(offset.x > 7.9 && offset.x <= 8.0 + 1e-9);
        assert!(offset.y.abs() < 0.5);
        assert!(app.tracker.is_settled());
    }

    #[test]
    fn test_toggle_motion_parks_eyes() {
        let mut app = app_with(instant_config());
        app.probe.place(EYE_LEFT, CellRect::new(10, 1, 10, 5));
        app.apply(Action::PointerMove { column: 0, row: 3 });
        app.tick(Duration::from_millis(100));
        assert!(app.eye_offset(0).length() > 0.0);

        app.apply(Action::ToggleMotion);
        assert!(app.reduced_motion);
        assert_eq!(app.eye_offset(0), Point::ZERO);
        assert_eq!(app.pulse_phase(), None);

        app.apply(Action::ToggleMotion);
        assert!(!app.reduced_motion);
        assert!(app.pulse_phase().is_some());
    }

    #[test]
    fn test_help_mode() {
        let mut app = app_with(AppConfig::default());
        app.apply(Action::ShowHelp);
        assert_eq!(app.mode, Mode::Help);
        app.apply(Action::ExitMode);
        assert_eq!(app.mode, Mode::Normal);
        app.apply(Action::Quit);
        assert!(app.should_quit);
    }
}
