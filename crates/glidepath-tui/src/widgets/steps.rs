use glidepath_core::{GuideSnapshot, StepState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, List, ListItem, ListState},
    Frame,
};

use super::guide::state_style;
use crate::app::App;

pub struct StepsWidget;

impl StepsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &GuideSnapshot) {
        let theme = &app.theme;
        let block = Block::default()
            .title(" Steps ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let items: Vec<ListItem> = app
            .guide
            .steps()
            .iter()
            .zip(&snapshot.steps)
            .enumerate()
            .map(|(i, (step, state))| {
                let title = if step.title.is_empty() { &step.id } else { &step.title };
                let mut lines = vec![Line::from(vec![
                    Span::styled(format!("{} ", state_marker(*state)), state_style(theme, *state)),
                    Span::styled(format!("{}. {}", i + 1, title), state_style(theme, *state)),
                ])];
                if *state != StepState::Pending {
                    lines.push(Line::from(Span::styled(
                        format!("    ⏎ {}", step.destination),
                        Style::default().fg(theme.muted),
                    )));
                }
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(theme.surface)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default().with_selected(Some(snapshot.focused_step));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let gauge = LineGauge::default()
            .filled_style(Style::default().fg(theme.accent))
            .unfilled_style(Style::default().fg(theme.pending))
            .label(format!("{:>3.0}%", snapshot.fraction * 100.0))
            .ratio(snapshot.fraction.clamp(0.0, 1.0));
        frame.render_widget(gauge, chunks[1]);
    }
}

fn state_marker(state: StepState) -> &'static str {
    match state {
        StepState::Complete => "✓",
        StepState::Active => "▶",
        StepState::Pending => "·",
    }
}
