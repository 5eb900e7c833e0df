//! Rendering. [`results_view`] and [`row_view`] decide *what* to show from
//! committed state; [`draw`] lays it out. Neither mutates state or performs
//! I/O; `draw` only reports where it put the clickable widgets.
use {
    super::{
        notice::NoticeLevel,
        query::TokenRow,
        state::{AppState, QueryState},
    },
    crate::{
        constants::{APP_NAME, DEFAULT_TOKEN_DECIMALS, DISPLAY_DECIMALS, MIN_TERMINAL_HEIGHT},
        libs::tui::{
            draw_button, draw_input, draw_main_window, draw_panel, draw_spinner, draw_status,
            draw_table, draw_title_bar, Theme,
        },
    },
    alchemy::format_fixed,
    alloy::primitives::{hex, Address, U256},
    ratatui::{prelude::*, widgets::Paragraph},
};

pub const CHECK_LABEL: &str = "Check ERC-20 Token Balances";
pub const CHECKING_LABEL: &str = "Checking Balances";
pub const PLACEHOLDER_TEXT: &str = "Enter an address and check its balances.";
pub const EMPTY_TEXT: &str = "No token balances found.";
pub const KEY_HELP: &str = "tab focus · enter select · c wallet · ↑↓ rows · q quit";

/// Which of the four results views the state calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView<'a> {
    Loading,
    Placeholder,
    Empty,
    Table(&'a [TokenRow]),
}

pub fn results_view(query: &QueryState) -> ResultsView<'_> {
    if query.loading {
        ResultsView::Loading
    } else if !query.has_queried {
        ResultsView::Placeholder
    } else if query.rows.is_empty() {
        ResultsView::Empty
    } else {
        ResultsView::Table(&query.rows)
    }
}

/// Display strings for one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// `◉` when the indexer knows a logo for the token.
    pub logo: &'static str,
    pub name: String,
    pub symbol: String,
    pub balance: String,
    pub contract: String,
    pub logo_url: Option<String>,
}

pub fn row_view(row: &TokenRow) -> RowView {
    let meta = &row.metadata;
    let contract = row.balance.contract_address;
    RowView {
        logo: if meta.logo.is_some() { "◉" } else { " " },
        name: meta
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| short_token(contract)),
        symbol: meta
            .symbol
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "?".to_string()),
        balance: display_balance(row.balance.raw_balance, meta.decimals),
        contract: contract.to_string(),
        logo_url: meta.logo.clone(),
    }
}

/// `raw / 10^decimals` at `precision` fractional digits. Unknown decimals
/// are treated as 18.
pub fn balance_text(raw: U256, decimals: Option<u8>, precision: usize) -> String {
    format_fixed(raw, decimals.unwrap_or(DEFAULT_TOKEN_DECIMALS), precision)
}

pub fn display_balance(raw: U256, decimals: Option<u8>) -> String {
    balance_text(raw, decimals, *DISPLAY_DECIMALS)
}

/// `0xa0b869…06eb48`, used when a token has no name.
pub fn short_token(token: Address) -> String {
    let s = token.as_slice();
    format!("0x{}…{}", hex::encode(&s[0..3]), hex::encode(&s[17..20]))
}

pub fn short_addr(addr: &str) -> String {
    if addr.len() > 12 {
        let (a, b) = addr.split_at(6);
        let tail = &b[b.len().saturating_sub(4)..];
        format!("{}…{}", a, tail)
    } else {
        addr.to_string()
    }
}

pub fn connect_label(state: &AppState, connecting: bool) -> &'static str {
    if connecting {
        "Connecting…"
    } else if state.session.is_connected() {
        "Disconnect Wallet"
    } else {
        "Connect Wallet"
    }
}

pub fn check_label(query: &QueryState) -> &'static str {
    if query.loading {
        CHECKING_LABEL
    } else {
        CHECK_LABEL
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    Check,
    Connect,
    Table,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Check,
            Focus::Check => Focus::Table,
            Focus::Table => Focus::Connect,
            Focus::Connect => Focus::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Connect,
            Focus::Connect => Focus::Table,
            Focus::Table => Focus::Check,
            Focus::Check => Focus::Input,
        }
    }
}

/// Presentation-only state owned by the event loop.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: Focus,
    pub selected: usize,
    pub tick: usize,
    pub connecting: bool,
    /// network and wallet, shown in the title bar
    pub status: String,
}

/// Where the clickable widgets ended up in the last frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewAreas {
    pub connect_btn: Option<Rect>,
    pub input: Option<Rect>,
    pub check_btn: Option<Rect>,
    pub table: Option<Rect>,
    /// First table row visible inside `table`.
    pub table_offset: usize,
}

pub fn draw(f: &mut Frame, state: &AppState, ui: &UiState) -> ViewAreas {
    let theme = Theme::tokdex_dark();
    let size = f.area();
    let mut areas = ViewAreas::default();

    if size.height < *MIN_TERMINAL_HEIGHT {
        let msg = format!(
            "Terminal too small: {} rows, need {}.",
            size.height, *MIN_TERMINAL_HEIGHT
        );
        f.render_widget(
            Paragraph::new(msg)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.warn)),
            size,
        );
        return areas;
    }

    let inner = draw_main_window(f, size, &theme);
    let [title, wallet, heading, input, check, results, detail, notice] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(inner);

    draw_title_bar(f, title, &theme, APP_NAME, &ui.status, KEY_HELP);

    // wallet panel: tagline, address line, toggle button
    let address_line = match state.session.address() {
        Some(addr) => Line::from(vec![
            Span::styled("Connected Address: ", Style::default().fg(theme.muted)),
            Span::styled(addr.to_string(), Style::default().fg(theme.good)),
        ]),
        None => Line::from(Span::styled("Not connected", Style::default().fg(theme.muted))),
    };
    let panel_inner = draw_panel(
        f,
        wallet,
        "Wallet",
        Color::LightBlue,
        vec![
            Line::from("Connect your wallet to check all your ERC-20 token balances."),
            address_line,
        ],
    );
    if panel_inner.height >= 3 {
        let btn = Rect {
            y: panel_inner.y + 2,
            height: 1,
            width: panel_inner.width.min(24),
            ..panel_inner
        };
        let fill = if state.session.is_connected() {
            theme.danger
        } else {
            theme.action
        };
        draw_button(
            f,
            btn,
            connect_label(state, ui.connecting),
            fill,
            ui.focus == Focus::Connect,
            ui.connecting,
        );
        areas.connect_btn = Some(btn);
    }

    f.render_widget(
        Paragraph::new("Get all the ERC-20 token balances of this address:")
            .style(Style::default().fg(theme.fg).add_modifier(Modifier::BOLD)),
        heading,
    );
    draw_input(
        f,
        input,
        "Address",
        &state.address_input,
        "0x…",
        ui.focus == Focus::Input,
    );
    areas.input = Some(input);

    let check_btn = Rect {
        width: check.width.min(36),
        ..check
    };
    draw_button(
        f,
        check_btn,
        check_label(&state.query),
        theme.action,
        ui.focus == Focus::Check,
        state.query.loading,
    );
    areas.check_btn = Some(check_btn);

    let body = draw_panel(f, results, "ERC-20 token balances", theme.accent, Vec::new());
    let mut detail_text = String::new();
    match results_view(&state.query) {
        ResultsView::Loading => {
            draw_spinner(f, body, ui.tick, CHECKING_LABEL, theme.accent);
        }
        ResultsView::Placeholder => {
            f.render_widget(
                Paragraph::new(PLACEHOLDER_TEXT)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.muted)),
                body,
            );
        }
        ResultsView::Empty => {
            f.render_widget(
                Paragraph::new(EMPTY_TEXT)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.muted)),
                body,
            );
        }
        ResultsView::Table(rows) => {
            let views: Vec<RowView> = rows.iter().map(row_view).collect();
            let selected = ui.selected.min(views.len().saturating_sub(1));
            if let Some(v) = views.get(selected) {
                detail_text = format!(
                    "{} · {}",
                    v.contract,
                    v.logo_url.as_deref().unwrap_or("no logo")
                );
            }
            let cells = views
                .into_iter()
                .map(|v| vec![format!("{} {}", v.logo, v.name), v.symbol, v.balance])
                .collect();
            areas.table_offset = draw_table(
                f,
                body,
                &["Token", "Symbol", "Balance"],
                &[
                    Constraint::Percentage(50),
                    Constraint::Percentage(20),
                    Constraint::Percentage(30),
                ],
                cells,
                &[2],
                Some(selected),
            );
            areas.table = Some(body);
        }
    }

    f.render_widget(
        Paragraph::new(detail_text).style(Style::default().fg(theme.accent_soft)),
        detail,
    );

    if let Some(n) = &state.notice {
        let color = match n.level {
            NoticeLevel::Success => theme.good,
            NoticeLevel::Info => theme.accent,
            NoticeLevel::Warning => theme.warn,
            NoticeLevel::Error => theme.bad,
        };
        draw_status(f, notice, &n.title, &n.body, color);
    }

    areas
}
