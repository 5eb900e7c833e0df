use std::{
    env, fmt,
    fs::{create_dir_all, OpenOptions},
    io::{self, Write},
    sync::atomic::{AtomicBool, Ordering},
};

pub mod cc {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RESET: &str = "\x1b[0m";
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
    pub const LIGHT_CYAN: &str = "\x1b[96m";
}

/// Set while the alternate screen is up; console writes would tear the UI.
static TUI_ACTIVE: AtomicBool = AtomicBool::new(false);

pub fn set_tui_active(active: bool) {
    TUI_ACTIVE.store(active, Ordering::SeqCst);
}

pub fn tui_active() -> bool {
    TUI_ACTIVE.load(Ordering::SeqCst)
}

/// Backend of [`log!`](crate::log): timestamped colored line on stderr, or
/// the debug log file while the TUI owns the terminal.
pub fn write_log(color: &str, args: fmt::Arguments<'_>) {
    if tui_active() {
        save_log_to_file(&args.to_string());
        return;
    }
    let time = chrono::Utc::now().format("%H:%M:%S%.3f");
    let mut stderr = io::stderr().lock();
    let _ = writeln!(
        stderr,
        "{}{} | {}{}{}{}",
        cc::LIGHT_GRAY,
        time,
        cc::RESET,
        color,
        args,
        cc::RESET
    );
}

#[macro_export]
macro_rules! log {
    // log!("plain {}", x); must come first, a literal also parses as a color expr
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::libs::writing::write_log(
            $crate::libs::writing::cc::LIGHT_GRAY,
            format_args!($fmt $(, $arg)*),
        )
    };
    // log!(cc::GREEN, "fetched {} rows", n);
    ($color:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::libs::writing::write_log($color, format_args!($fmt $(, $arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::libs::writing::write_log(
            $crate::libs::writing::cc::ORANGE,
            format_args!($($arg)*),
        )
    };
}

pub fn save_log_to_file(log: &str) {
    // skip if not enabled
    if !is_debug_logs_enabled() {
        return;
    }

    if let Err(e) = create_dir_all("logs") {
        if !tui_active() {
            eprintln!("save_log_to_file mkdir error: {e}");
        }
        return;
    }
    let day = chrono::Utc::now().format("%d-%m-%Y").to_string();
    let file_name = format!("logs/tokdex_{day}.txt");
    let time_now = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();

    if let Err(e) = append_line(&file_name, &format!("[{time_now}] {log}")) {
        if !tui_active() {
            eprintln!("save_log_to_file error: {e}");
        }
    }
}

fn is_debug_logs_enabled() -> bool {
    match env::var("DEBUG_LOGS") {
        Ok(val) => val.eq_ignore_ascii_case("true"),
        Err(_) => false,
    }
}

fn append_line(path: &str, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn smoke_log_variants_compile() {
        crate::log!(crate::libs::writing::cc::GREEN, "colored no args");
        crate::log!(crate::libs::writing::cc::GREEN, "colored with arg: {}", 123);
        crate::log!("plain no args");
        crate::log!("plain with arg: {}", 456);
        crate::warn!("warn with arg: {}", 789);
    }
}
