use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Bordered one-line status with a bold title, e.g. a notice.
pub fn draw_status(f: &mut Frame, area: Rect, title: &str, text: &str, color: Color) {
    let line = Line::from(vec![
        Span::styled(format!("{title}: "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(text, Style::default().fg(color)),
    ]);
    let p = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(p, area);
}
