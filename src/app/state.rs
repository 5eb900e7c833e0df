//! Everything the renderer reads, and the transitions the actions apply.
//! Network work lives in [`session`](super::session) and
//! [`query`](super::query); the event loop runs it between
//! `begin_fetch`/`finish_fetch` and before `on_wallet_connected`.
use {
    super::{
        notice::Notice,
        query::{parse_owner, TokenRow},
        session::Session,
    },
    crate::libs::{error::AppError, writing::save_log_to_file},
    alloy::primitives::Address,
    std::time::Instant,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub loading: bool,
    pub has_queried: bool,
    pub rows: Vec<TokenRow>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    /// The editable address field. Connecting fills it, disconnecting clears it.
    pub address_input: String,
    pub query: QueryState,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, notice: Notice) {
        save_log_to_file(&format!("[notice] {}: {}", notice.title, notice.body));
        self.notice = Some(notice);
    }

    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.expired(now)) {
            self.notice = None;
        }
    }

    /// Commit the outcome of a connect request. Failure leaves the session
    /// and the address field as they were.
    pub fn on_wallet_connected(&mut self, outcome: Result<Address, AppError>) {
        match outcome {
            Ok(address) => {
                self.session.connect_to(address);
                self.address_input = address.to_string();
                self.notify(Notice::success("Connected", "Wallet connected successfully."));
            }
            Err(err) => {
                self.notify(Notice::error(
                    "Connection Error",
                    format!("Failed to connect the wallet: {err}."),
                ));
            }
        }
    }

    pub fn disconnect(&mut self) {
        self.session.clear();
        self.address_input.clear();
        self.notify(Notice::info("Disconnected", "Wallet disconnected."));
    }

    /// Validate the address field and mark the query as loading.
    ///
    /// Refused while another check is in flight. Nothing changes on error
    /// except the notice.
    pub fn begin_fetch(&mut self) -> Result<Address, AppError> {
        if self.query.loading {
            self.notify(Notice::info("Busy", "Already checking balances."));
            return Err(AppError::Busy);
        }
        match parse_owner(&self.address_input) {
            Ok(owner) => {
                self.query.loading = true;
                Ok(owner)
            }
            Err(err) => {
                self.notify(Notice::warning(
                    "Input Error",
                    "Please enter a valid Ethereum address.",
                ));
                Err(err)
            }
        }
    }

    /// Commit a finished fetch: all rows at once on success, prior rows
    /// untouched on failure. Loading always ends.
    pub fn finish_fetch(&mut self, outcome: Result<Vec<TokenRow>, AppError>) {
        self.query.loading = false;
        match outcome {
            Ok(rows) => {
                self.query.rows = rows;
                self.query.has_queried = true;
            }
            Err(err) => {
                save_log_to_file(&format!("[query] failed: {err}"));
                self.notify(Notice::error(
                    "Fetching Error",
                    "Failed to fetch token balances.",
                ));
            }
        }
    }
}
