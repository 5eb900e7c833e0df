//! File logging for the indexer client. The terminal belongs to the UI, so
//! nothing here ever writes to stdout or stderr.
use std::{fs::OpenOptions, io::Write, path::Path};

/// Logging is off unless `DEBUG_LOGS=true`, same switch as the app.
pub fn enabled() -> bool {
    std::env::var("DEBUG_LOGS")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn write_line(line: &str) {
    if !enabled() {
        return;
    }
    let path =
        std::env::var("ALCHEMY_LOG_PATH").unwrap_or_else(|_| "logs/alchemy.log".to_string());
    if let Some(parent) = Path::new(&path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&path) {
        let time = chrono::Utc::now().format("%H:%M:%S%.3f");
        let _ = writeln!(f, "{time} | {line}");
    }
}

#[macro_export]
macro_rules! trace_rpc {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::writing::write_line(&format!($fmt $(, $arg)*))
    };
}
