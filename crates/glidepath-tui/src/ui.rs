//! Frame layout: eyes header, guide canvas, step list, status bar

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode, EYE_LEFT, EYE_RIGHT};
use crate::widgets::{EyesWidget, GuideWidget, PopupWidget, StatusBarWidget, StepsWidget};

const HEADER_HEIGHT: u16 = 7;
const EYE_WIDTH: u16 = 13;
const EYE_GAP: u16 = 2;

/// Draw one frame and record where the eyes landed for the next one
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let eyes = eye_areas(chunks[0]);
    match eyes {
        Some(areas) => {
            app.probe.place(EYE_LEFT, areas[0]);
            app.probe.place(EYE_RIGHT, areas[1]);
        }
        None => {
            app.probe.remove(EYE_LEFT);
            app.probe.remove(EYE_RIGHT);
        }
    }

    let app = &*app;
    let snapshot = app.snapshot();

    if let Some(areas) = eyes {
        EyesWidget::render(frame, areas, app);
    }
    render_title(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    GuideWidget::render(frame, body[0], app, &snapshot);
    StepsWidget::render(frame, body[1], app, &snapshot);
    StatusBarWidget::render(frame, chunks[2], app, &snapshot);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, &app.config.keymap, &app.theme);
    }
}

/// Two eyes side by side, centered in the header; `None` if they do not fit
pub fn eye_areas(header: Rect) -> Option<[Rect; 2]> {
    let needed = EYE_WIDTH * 2 + EYE_GAP;
    if header.width < needed || header.height < 3 {
        return None;
    }
    let x = header.x + (header.width - needed) / 2;
    Some([
        Rect::new(x, header.y, EYE_WIDTH, header.height),
        Rect::new(x + EYE_WIDTH + EYE_GAP, header.y, EYE_WIDTH, header.height),
    ])
}

fn render_title(frame: &mut Frame, header: Rect, app: &App) {
    if header.height == 0 {
        return;
    }
    let title = Paragraph::new(Line::from(Span::styled(
        " glidepath ",
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Left);
    frame.render_widget(title, Rect::new(header.x, header.y, header.width.min(12), 1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use glidepath_core::{AppConfig, GeometryProbe};
    use ratatui::{backend::TestBackend, Terminal};

    use crate::theme::Theme;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_eye_areas_centered() {
        let areas = eye_areas(Rect::new(0, 0, 80, 7)).unwrap();
        assert_eq!(areas[0], Rect::new(26, 0, 13, 7));
        assert_eq!(areas[1], Rect::new(41, 0, 13, 7));
        assert!(eye_areas(Rect::new(0, 0, 20, 7)).is_none());
    }

    #[test]
    fn test_draw_records_eye_geometry() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let left = app.probe.measure(EYE_LEFT).unwrap();
        assert_eq!(left.center().x, 32.5);
        assert!(app.probe.measure(EYE_RIGHT).is_some());

        let text = buffer_text(&terminal);
        assert!(text.contains("Create your account"));
        assert!(text.contains("glidepath"));
    }

    #[test]
    fn test_draw_help_popup() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default()).unwrap();
        app.mode = Mode::Help;
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("press any key to close"));
    }

    #[test]
    fn test_draw_tiny_terminal() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();

        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(app.probe.measure(EYE_LEFT).is_none());
    }
}
