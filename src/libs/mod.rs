pub mod config;
pub mod error;
pub mod tui;
pub mod wallet;
pub mod writing;
