use glidepath_core::GuideSnapshot;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &GuideSnapshot) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };
        let motion_str = if app.reduced_motion { "still" } else { "motion" };

        let step_str = match snapshot.active_step {
            Some(index) => format!("Step {}/{}", index + 1, app.guide.len()),
            None if snapshot.coordinate >= app.guide.len() as f64 => "Done".to_string(),
            None => "Not started".to_string(),
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | {} | {:.2} | {}",
                mode_str, step_str, snapshot.coordinate, motion_str
            )
        };

        let help_hint = " q:quit j/k:scroll n/N:step ⏎:go m:motion ?:help ";
        let used = status_text.chars().count() + help_hint.chars().count();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg).bg(theme.surface)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.surface)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.surface)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
