use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Bordered single-line text field. An empty value shows `placeholder`
/// dimmed; focus adds a cursor and highlights the border.
pub fn draw_input(f: &mut Frame, area: Rect, label: &str, value: &str, placeholder: &str, focused: bool) {
    let body = if value.is_empty() {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(value, Style::default().fg(Color::White))
    };
    let line = Line::from(vec![body, Span::raw(if focused { "_" } else { "" })]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", label), Style::default().fg(Color::Gray)))
        .border_style(Style::default().fg(if focused {
            Color::LightCyan
        } else {
            Color::Gray
        }));
    f.render_widget(Paragraph::new(line).block(block), area);
}
