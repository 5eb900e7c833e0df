use ratatui::{prelude::*, widgets::Paragraph};

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Indeterminate progress: a braille spinner and a label, centered.
pub fn draw_spinner(f: &mut Frame, area: Rect, tick: usize, label: &str, color: Color) {
    let line = Line::from(vec![
        Span::styled(spinner_frame(tick), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(color)),
    ]);
    let mid = Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), mid);
}
