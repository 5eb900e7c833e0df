use ratatui::{
    prelude::*,
    widgets::{Cell, Row, Table, TableState},
};

/// Header + rows with one highlighted row. Columns listed in `numeric`
/// are right-aligned. Returns the index of the first visible row.
pub fn draw_table(
    f: &mut Frame,
    area: Rect,
    headers: &[&str],
    widths: &[Constraint],
    rows: Vec<Vec<String>>,
    numeric: &[usize],
    selected: Option<usize>,
) -> usize {
    let align = |col: usize| {
        if numeric.contains(&col) {
            Alignment::Right
        } else {
            Alignment::Left
        }
    };
    let header = Row::new(
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| Cell::from(Text::from(*h).alignment(align(i)))),
    )
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let body: Vec<Row> = rows
        .into_iter()
        .map(|cells| {
            Row::new(
                cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| Cell::from(Text::from(c).alignment(align(i)))),
            )
        })
        .collect();

    let table = Table::new(body, widths.to_vec())
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);
    state.offset()
}
