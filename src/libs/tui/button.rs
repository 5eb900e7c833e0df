use ratatui::{
    prelude::*,
    widgets::{Clear, Paragraph},
};

/// Filled button. Focus is shown with bold + a `>` marker; `busy` greys the
/// fill because the action would be refused anyway.
pub fn draw_button(f: &mut Frame, area: Rect, label: &str, fill: Color, focused: bool, busy: bool) {
    f.render_widget(Clear, area);
    let bg = if busy { Color::DarkGray } else { fill };
    let mut style = Style::default().fg(Color::Black).bg(bg);
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    let text = if focused {
        format!("> {} <", label)
    } else {
        format!("  {}  ", label)
    };
    let p = Paragraph::new(Line::from(Span::styled(text, style))).alignment(Alignment::Center);
    f.render_widget(p, area);
}
