use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;
use glidepath_core::config::KeymapConfig;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overview
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let area = frame.area();
        let rows = help_rows(keymap);

        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (rows.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface));

        let mut lines: Vec<Line> = rows
            .into_iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>8}  ", key),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description, Style::default().fg(theme.fg)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "press any key to close",
            Style::default().fg(theme.muted),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

fn help_rows(keymap: &KeymapConfig) -> Vec<(String, &'static str)> {
    vec![
        (format!("{}/{}", keymap.scroll_down, keymap.scroll_up), "scroll"),
        (format!("{}/{}", keymap.page_down, keymap.page_up), "page"),
        (format!("{}/{}", keymap.jump_to_top, keymap.jump_to_bottom), "top / bottom"),
        (format!("{}/{}", keymap.next_step, keymap.prev_step), "next / previous step"),
        (keymap.trigger.clone(), "open focused step"),
        (keymap.toggle_motion.clone(), "toggle reduced motion"),
        (keymap.quit.clone(), "quit"),
    ]
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
