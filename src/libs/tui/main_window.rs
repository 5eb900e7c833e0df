use crate::libs::tui::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Padding},
};

/// Outer frame; returns the padded area to lay the rest out in.
pub fn draw_main_window(f: &mut Frame, area: Rect, theme: &Theme) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(theme.bg).fg(theme.fg))
        .padding(Padding::new(1, 1, 0, 0));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}
