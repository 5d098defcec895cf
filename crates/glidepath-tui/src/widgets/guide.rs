//! Pins and connectors of the step guide, drawn on a braille canvas

use glidepath_core::guide::path_point;
use glidepath_core::{GuideSnapshot, Point, StepState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Points},
        Block, Borders,
    },
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

/// Samples per connector
const PATH_SAMPLES: usize = 48;
/// Margin around the pins in guide units
const MARGIN: f64 = 6.0;
const PIN_RADIUS: f64 = 1.5;

pub struct GuideWidget;

impl GuideWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &GuideSnapshot) {
        let anchors: Vec<Point> = app.guide.steps().iter().map(|s| s.anchor).collect();
        let (x_bounds, y_bounds) = guide_bounds(&anchors);
        let pulse = app.pulse_phase();
        let theme = &app.theme;

        let block = Block::default()
            .title(format!(" Guide {}/{} ", snapshot.focused_step + 1, app.guide.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg));

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .background_color(theme.bg)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for segment in &snapshot.segments {
                    let split = segment.state.draw_fraction;
                    let (drawn, remaining) = sample_path(segment.from, segment.to, split);
                    ctx.draw(&Points {
                        coords: &remaining,
                        color: theme.pending,
                    });
                    ctx.draw(&Points {
                        coords: &drawn,
                        color: theme.complete,
                    });

                    if let (true, Some(phase)) = (segment.state.pulse_visible, pulse) {
                        let (x, y) = canvas_point(path_point(segment.from, segment.to, phase));
                        ctx.draw(&Circle {
                            x,
                            y,
                            radius: 0.8,
                            color: theme.pulse,
                        });
                    }
                }

                ctx.layer();
                for ((anchor, state), step) in anchors
                    .iter()
                    .zip(&snapshot.steps)
                    .zip(app.guide.steps())
                {
                    let (x, y) = canvas_point(*anchor);
                    let color = state_color(theme, *state);
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: PIN_RADIUS,
                        color,
                    });
                    ctx.print(
                        x + PIN_RADIUS + 1.0,
                        y,
                        Line::from(Span::styled(step.id.clone(), Style::default().fg(color))),
                    );
                }
            });

        frame.render_widget(canvas, area);
    }
}

/// Color for a step state
pub fn state_color(theme: &Theme, state: StepState) -> Color {
    match state {
        StepState::Complete => theme.complete,
        StepState::Active => theme.active,
        StepState::Pending => theme.pending,
    }
}

/// Style for a step title in lists
pub fn state_style(theme: &Theme, state: StepState) -> Style {
    let style = Style::default().fg(state_color(theme, state));
    if state == StepState::Active {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Guide space grows downward; the canvas grows upward
pub fn canvas_point(point: Point) -> (f64, f64) {
    (point.x, -point.y)
}

/// Canvas bounds covering every pin plus a margin
pub fn guide_bounds(anchors: &[Point]) -> ([f64; 2], [f64; 2]) {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (x, y) in anchors.iter().map(|a| canvas_point(*a)) {
        min = Point::new(min.x.min(x), min.y.min(y));
        max = Point::new(max.x.max(x), max.y.max(y));
    }
    if !min.is_finite() || !max.is_finite() {
        return ([-MARGIN, MARGIN], [-MARGIN, MARGIN]);
    }
    (
        [min.x - MARGIN, max.x + MARGIN * 4.0],
        [min.y - MARGIN, max.y + MARGIN],
    )
}

/// Sample a connector, split at `draw_fraction` into drawn and remaining points
pub fn sample_path(from: Point, to: Point, draw_fraction: f64) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let mut drawn = Vec::new();
    let mut remaining = Vec::new();
    for i in 0..=PATH_SAMPLES {
        let t = i as f64 / PATH_SAMPLES as f64;
        let point = canvas_point(path_point(from, to, t));
        if t <= draw_fraction && draw_fraction > 0.0 {
            drawn.push(point);
        } else {
            remaining.push(point);
        }
    }
    (drawn, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_path_split() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(24.0, 8.0);

        let (drawn, remaining) = sample_path(from, to, 0.0);
        assert!(drawn.is_empty());
        assert_eq!(remaining.len(), PATH_SAMPLES + 1);

        let (drawn, remaining) = sample_path(from, to, 1.0);
        assert_eq!(drawn.len(), PATH_SAMPLES + 1);
        assert!(remaining.is_empty());
        assert_eq!(drawn[0], (0.0, 0.0));
        assert_eq!(drawn[PATH_SAMPLES], (24.0, -8.0));

        let (drawn, remaining) = sample_path(from, to, 0.5);
        assert_eq!(drawn.len(), PATH_SAMPLES / 2 + 1);
        assert_eq!(drawn.len() + remaining.len(), PATH_SAMPLES + 1);
    }

    #[test]
    fn test_guide_bounds_cover_pins() {
        let anchors = [Point::new(0.0, 0.0), Point::new(24.0, 8.0)];
        let (x, y) = guide_bounds(&anchors);
        assert!(x[0] < 0.0 && x[1] > 24.0);
        assert!(y[0] < -8.0 && y[1] > 0.0);

        assert_eq!(guide_bounds(&[]), ([-MARGIN, MARGIN], [-MARGIN, MARGIN]));
    }
}
