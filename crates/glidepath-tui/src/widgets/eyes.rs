use glidepath_core::Point;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::probe::ROW_UNITS;

pub struct EyesWidget;

impl EyesWidget {
    /// Render both eyes into the areas recorded for them
    pub fn render(frame: &mut Frame, areas: [Rect; 2], app: &App) {
        for (index, area) in areas.into_iter().enumerate() {
            Self::render_eye(frame, area, app.eye_offset(index), app);
        }
    }

    fn render_eye(frame: &mut Frame, area: Rect, offset: Point, app: &App) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.border))
            .style(Style::default().bg(app.theme.surface));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some((x, y)) = pupil_cell(inner, offset) {
            let pupil = Paragraph::new(Span::styled(
                "●",
                Style::default()
                    .fg(app.theme.pupil)
                    .add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(pupil, Rect::new(x, y, 1, 1));
        }
    }
}

/// Cell holding the pupil for a layout-space offset, kept inside `inner`
pub fn pupil_cell(inner: Rect, offset: Point) -> Option<(u16, u16)> {
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    let offset = if offset.is_finite() { offset } else { Point::ZERO };

    let center_x = inner.x as f64 + (inner.width - 1) as f64 / 2.0;
    let center_y = inner.y as f64 + (inner.height - 1) as f64 / 2.0;
    let x = (center_x + offset.x).round();
    let y = (center_y + offset.y / ROW_UNITS).round();

    let max_x = (inner.x + inner.width - 1) as f64;
    let max_y = (inner.y + inner.height - 1) as f64;
    Some((
        x.clamp(inner.x as f64, max_x) as u16,
        y.clamp(inner.y as f64, max_y) as u16,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pupil_centered_at_rest() {
        let inner = Rect::new(11, 2, 9, 3);
        assert_eq!(pupil_cell(inner, Point::ZERO), Some((15, 3)));
    }

    #[test]
    fn test_pupil_follows_offset() {
        let inner = Rect::new(11, 2, 9, 3);
        assert_eq!(pupil_cell(inner, Point::new(3.0, 2.0)), Some((18, 4)));
        assert_eq!(pupil_cell(inner, Point::new(-3.0, -2.0)), Some((12, 2)));
    }

    #[test]
    fn test_pupil_stays_inside() {
        let inner = Rect::new(11, 2, 9, 3);
        assert_eq!(pupil_cell(inner, Point::new(50.0, 50.0)), Some((19, 4)));
        assert_eq!(pupil_cell(inner, Point::new(f64::NAN, 0.0)), Some((15, 3)));
        assert_eq!(pupil_cell(Rect::new(0, 0, 0, 3), Point::ZERO), None);
    }
}
