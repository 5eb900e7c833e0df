use crate::libs::tui::theme::Theme;
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

/// One-row bar: app name on the accent, then a status and the key help.
pub fn draw_title_bar(f: &mut Frame, area: Rect, theme: &Theme, app_name: &str, status: &str, help: &str) {
    let left = Span::styled(
        format!(" {} ", app_name),
        Style::default()
            .fg(theme.bg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );
    let center = Span::styled(format!("  {}  ", status), Style::default().fg(theme.muted));
    let right = Span::styled(
        help,
        Style::default()
            .fg(theme.accent_soft)
            .add_modifier(Modifier::ITALIC),
    );

    let line = Line::from(vec![left, center, right]);
    let p = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::new().style(Style::default().bg(theme.bg)));
    f.render_widget(p, area);
}
