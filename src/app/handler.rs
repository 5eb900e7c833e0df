use {
    super::{
        query::{fetch_token_rows, TokenIndexer, TokenRow},
        session::request_wallet_address,
        state::AppState,
        view::{draw, short_addr, Focus, UiState, ViewAreas},
    },
    crate::{
        libs::{
            config::{load_env, Config},
            error::AppError,
            tui::contains,
            wallet::{Wallet, WalletProvider},
            writing::{cc, save_log_to_file, set_tui_active},
        },
        log,
    },
    alchemy::AlchemyClient,
    alloy::primitives::Address,
    anyhow::{Context, Result},
    crossterm::{
        event::{
            DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
            KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    futures_util::StreamExt,
    ratatui::{backend::CrosstermBackend, Terminal},
    std::{
        future::Future,
        io::Stdout,
        pin::Pin,
        time::{Duration, Instant},
    },
};

const PAGE_ROWS: usize = 10;

/// A request the loop is waiting on. Polled only from the loop, so the
/// result is applied to state on the loop too.
type Pending<T> = Option<Pin<Box<dyn Future<Output = T>>>>;

async fn poll_pending<T>(slot: &mut Pending<T>) -> T {
    match slot.as_mut() {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}

pub async fn init() -> Result<()> {
    load_env();
    let cfg = Config::new()?;
    let indexer = AlchemyClient::new(
        &cfg.alchemy_api_key,
        cfg.network,
        Duration::from_secs(*crate::constants::HTTP_TIMEOUT_SECS),
    )
    .context("handler.rs: could not build the indexer client")?;
    let wallet = Wallet::from_config(&cfg).context("handler.rs: wallet configuration")?;

    let network = indexer.network();
    log!(cc::LIGHT_GREEN, "Network: {} (chain {})", network, network.chain_id());
    log!(cc::LIGHT_GREEN, "Wallet: {}", wallet.label());
    if matches!(wallet, Wallet::Absent) {
        crate::warn!("No wallet configured, addresses can still be typed in.");
    }

    let status = format!("{} · {}", network, wallet.label());
    let mut app = TokdexTUI::new(wallet, indexer, status);
    app.run_tui().await?;
    log!(cc::LIGHT_GRAY, "Bye.");
    Ok(())
}

/// What a key or click asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    ToggleWallet,
    CheckBalances,
}

pub struct TokdexTUI<W, I> {
    wallet: W,
    indexer: I,
    state: AppState,
    ui: UiState,
}

impl<W, I> TokdexTUI<W, I>
where
    W: WalletProvider + Clone + 'static,
    I: TokenIndexer + Clone + 'static,
{
    pub fn new(wallet: W, indexer: I, status: String) -> Self {
        Self {
            wallet,
            indexer,
            state: AppState::new(),
            ui: UiState {
                status,
                ..UiState::default()
            },
        }
    }

    async fn run_tui(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        set_tui_active(true);

        let res = self.event_loop(&mut terminal).await;

        set_tui_active(false);
        let mut stdout = std::io::stdout();
        execute!(stdout, DisableMouseCapture, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        terminal.show_cursor()?;
        res
    }

    async fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(Duration::from_millis(100));
        let mut connecting: Pending<Result<Address, AppError>> = None;
        let mut fetching: Pending<Result<Vec<TokenRow>, AppError>> = None;
        let mut areas = ViewAreas::default();

        loop {
            terminal.draw(|f| {
                areas = draw(f, &self.state, &self.ui);
            })?;

            let action = tokio::select! {
                maybe_ev = events.next() => match maybe_ev {
                    Some(Ok(Event::Key(key))) => handle_key(&mut self.state, &mut self.ui, key),
                    Some(Ok(Event::Mouse(me))) => handle_mouse(&mut self.state, &mut self.ui, &areas, me),
                    Some(Ok(_)) => Action::None,
                    Some(Err(e)) => {
                        save_log_to_file(&format!("[tui] event error: {e}"));
                        Action::None
                    }
                    None => Action::Quit,
                },
                _ = ticker.tick() => {
                    self.ui.tick = self.ui.tick.wrapping_add(1);
                    self.state.expire_notice(Instant::now());
                    Action::None
                }
                outcome = poll_pending(&mut connecting), if connecting.is_some() => {
                    connecting = None;
                    self.ui.connecting = false;
                    save_log_to_file(&format!("[wallet] connect -> {:?}", outcome));
                    self.state.on_wallet_connected(outcome);
                    Action::None
                }
                outcome = poll_pending(&mut fetching), if fetching.is_some() => {
                    fetching = None;
                    match &outcome {
                        Ok(rows) => save_log_to_file(&format!("[query] {} rows", rows.len())),
                        Err(e) => save_log_to_file(&format!("[query] {e}")),
                    }
                    self.ui.selected = 0;
                    self.state.finish_fetch(outcome);
                    Action::None
                }
            };

            match action {
                Action::None => {}
                Action::Quit => break,
                Action::ToggleWallet => {
                    if connecting.is_some() {
                        continue;
                    }
                    if self.state.session.is_connected() {
                        self.state.disconnect();
                    } else {
                        let wallet = self.wallet.clone();
                        self.ui.connecting = true;
                        connecting = Some(Box::pin(async move { request_wallet_address(&wallet).await }));
                    }
                }
                Action::CheckBalances => {
                    if let Ok(owner) = self.state.begin_fetch() {
                        save_log_to_file(&format!("[query] checking {}", short_addr(&owner.to_string())));
                        let indexer = self.indexer.clone();
                        fetching = Some(Box::pin(async move { fetch_token_rows(&indexer, owner).await }));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Map a key press onto state edits and an action.
pub fn handle_key(state: &mut AppState, ui: &mut UiState, key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let rows = state.query.rows.len();
    match key.code {
        KeyCode::Tab => {
            ui.focus = ui.focus.next();
            return Action::None;
        }
        KeyCode::BackTab => {
            ui.focus = ui.focus.prev();
            return Action::None;
        }
        KeyCode::Up => {
            ui.selected = ui.selected.saturating_sub(1);
            return Action::None;
        }
        KeyCode::Down => {
            ui.selected = clamp_row(ui.selected + 1, rows);
            return Action::None;
        }
        KeyCode::PageUp => {
            ui.selected = ui.selected.saturating_sub(PAGE_ROWS);
            return Action::None;
        }
        KeyCode::PageDown => {
            ui.selected = clamp_row(ui.selected + PAGE_ROWS, rows);
            return Action::None;
        }
        _ => {}
    }

    if ui.focus == Focus::Input {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.address_input.push(c);
            }
            KeyCode::Backspace => {
                state.address_input.pop();
            }
            KeyCode::Enter => return Action::CheckBalances,
            KeyCode::Esc => ui.focus = Focus::Check,
            _ => {}
        }
        return Action::None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') => Action::ToggleWallet,
        KeyCode::Home => {
            ui.selected = 0;
            Action::None
        }
        KeyCode::End => {
            ui.selected = rows.saturating_sub(1);
            Action::None
        }
        KeyCode::Enter => match ui.focus {
            Focus::Connect => Action::ToggleWallet,
            Focus::Check => Action::CheckBalances,
            Focus::Input | Focus::Table => Action::None,
        },
        _ => Action::None,
    }
}

/// Left clicks activate buttons and focus the input or the table; the wheel
/// moves the selection.
pub fn handle_mouse(state: &mut AppState, ui: &mut UiState, areas: &ViewAreas, me: MouseEvent) -> Action {
    let rows = state.query.rows.len();
    match me.kind {
        MouseEventKind::ScrollDown => {
            ui.selected = clamp_row(ui.selected + 1, rows);
            Action::None
        }
        MouseEventKind::ScrollUp => {
            ui.selected = ui.selected.saturating_sub(1);
            Action::None
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let hit = |r: Option<ratatui::layout::Rect>| r.is_some_and(|r| contains(r, me.column, me.row));
            if hit(areas.connect_btn) {
                ui.focus = Focus::Connect;
                Action::ToggleWallet
            } else if hit(areas.check_btn) {
                ui.focus = Focus::Check;
                Action::CheckBalances
            } else if hit(areas.input) {
                ui.focus = Focus::Input;
                Action::None
            } else if let Some(table) = areas.table.filter(|t| contains(*t, me.column, me.row)) {
                ui.focus = Focus::Table;
                // header row + its bottom margin
                let offset = (me.row - table.y) as usize;
                if let Some(i) = offset
                    .checked_sub(2)
                    .map(|i| i + areas.table_offset)
                    .filter(|i| *i < rows)
                {
                    ui.selected = i;
                }
                Action::None
            } else {
                Action::None
            }
        }
        _ => Action::None,
    }
}

fn clamp_row(i: usize, rows: usize) -> usize {
    i.min(rows.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::query::{
        tests::{meta, DAI, LINK, USDC},
        TokenBalanceEntry,
    };
    use alloy::primitives::U256;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn with_rows(n: usize) -> AppState {
        let mut state = AppState::new();
        state.query.has_queried = true;
        state.query.rows = [USDC, DAI, LINK]
            .iter()
            .cycle()
            .take(n)
            .map(|c| TokenRow {
                balance: TokenBalanceEntry {
                    contract_address: *c,
                    raw_balance: U256::from(1u64),
                },
                metadata: meta("Token", "TKN", 18),
            })
            .collect();
        state
    }

    #[test]
    fn typing_goes_to_the_input_and_enter_checks() {
        let mut state = AppState::new();
        let mut ui = UiState::default();
        for c in "0xq".chars() {
            assert_eq!(handle_key(&mut state, &mut ui, press(KeyCode::Char(c))), Action::None);
        }
        assert_eq!(state.address_input, "0xq");
        handle_key(&mut state, &mut ui, press(KeyCode::Backspace));
        assert_eq!(state.address_input, "0x");
        assert_eq!(handle_key(&mut state, &mut ui, press(KeyCode::Enter)), Action::CheckBalances);
    }

    #[test]
    fn shortcuts_only_outside_the_input() {
        let mut state = AppState::new();
        let mut ui = UiState::default();
        assert_eq!(handle_key(&mut state, &mut ui, press(KeyCode::Char('c'))), Action::None);

        ui.focus = Focus::Check;
        assert_eq!(handle_key(&mut state, &mut ui, press(KeyCode::Char('c'))), Action::ToggleWallet);
        assert_eq!(handle_key(&mut state, &mut ui, press(KeyCode::Enter)), Action::CheckBalances);
        assert_eq!(handle_key(&mut state, &mut ui, press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(state.address_input, "c");
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut state = AppState::new();
        let mut ui = UiState::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut state, &mut ui, key), Action::Quit);
        assert!(state.address_input.is_empty());
    }

    #[test]
    fn releases_are_ignored() {
        let mut state = AppState::new();
        let mut ui = UiState::default();
        let key = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut state, &mut ui, key);
        assert!(state.address_input.is_empty());
    }

    #[test]
    fn tab_moves_focus_and_enter_follows_it() {
        let mut state = AppState::new();
        let mut ui = UiState::default();
        handle_key(&mut state, &mut ui, press(KeyCode::BackTab));
        assert_eq!(ui.focus, Focus::Connect);
        assert_eq!(handle_key(&mut state, &mut ui, press(KeyCode::Enter)), Action::ToggleWallet);
        handle_key(&mut state, &mut ui, press(KeyCode::Tab));
        assert_eq!(ui.focus, Focus::Input);
    }

    #[test]
    fn selection_stays_inside_the_table() {
        let mut state = with_rows(3);
        let mut ui = UiState {
            focus: Focus::Table,
            ..UiState::default()
        };
        handle_key(&mut state, &mut ui, press(KeyCode::Up));
        assert_eq!(ui.selected, 0);
        handle_key(&mut state, &mut ui, press(KeyCode::PageDown));
        assert_eq!(ui.selected, 2);
        handle_key(&mut state, &mut ui, press(KeyCode::Home));
        assert_eq!(ui.selected, 0);
        handle_key(&mut state, &mut ui, press(KeyCode::End));
        assert_eq!(ui.selected, 2);

        let mut empty = AppState::new();
        handle_key(&mut empty, &mut ui, press(KeyCode::Down));
        assert_eq!(ui.selected, 0);
    }

    #[test]
    fn clicks_hit_the_drawn_widgets() {
        let mut state = with_rows(3);
        let mut ui = UiState::default();
        let areas = ViewAreas {
            connect_btn: Some(Rect::new(2, 4, 20, 1)),
            input: Some(Rect::new(2, 8, 60, 3)),
            check_btn: Some(Rect::new(2, 11, 30, 1)),
            table: Some(Rect::new(2, 13, 60, 10)),
            table_offset: 0,
        };

        assert_eq!(handle_mouse(&mut state, &mut ui, &areas, click(5, 4)), Action::ToggleWallet);
        assert_eq!(ui.focus, Focus::Connect);
        assert_eq!(handle_mouse(&mut state, &mut ui, &areas, click(5, 11)), Action::CheckBalances);
        assert_eq!(handle_mouse(&mut state, &mut ui, &areas, click(5, 9)), Action::None);
        assert_eq!(ui.focus, Focus::Input);

        handle_mouse(&mut state, &mut ui, &areas, click(5, 16));
        assert_eq!(ui.focus, Focus::Table);
        assert_eq!(ui.selected, 1);
        // clicks below the last row keep the selection
        handle_mouse(&mut state, &mut ui, &areas, click(5, 21));
        assert_eq!(ui.selected, 1);
    }

    #[test]
    fn clicks_on_a_scrolled_table_count_the_offset() {
        let mut state = with_rows(30);
        let mut ui = UiState::default();
        let areas = ViewAreas {
            table: Some(Rect::new(2, 13, 60, 10)),
            table_offset: 20,
            ..ViewAreas::default()
        };

        handle_mouse(&mut state, &mut ui, &areas, click(5, 15));
        assert_eq!(ui.selected, 20);
        handle_mouse(&mut state, &mut ui, &areas, click(5, 22));
        assert_eq!(ui.selected, 27);
    }

    #[tokio::test]
    async fn pending_slot_yields_its_future() {
        let mut slot: Pending<u8> = Some(Box::pin(async { 7 }));
        assert_eq!(poll_pending(&mut slot).await, 7);

        let mut empty: Pending<u8> = None;
        let raced = tokio::time::timeout(Duration::from_millis(10), poll_pending(&mut empty)).await;
        assert!(raced.is_err());
    }
}
