//! Structured logging with box-drawing output.
//!
//! Every line yearglance prints outside the live dashboard goes through the
//! macros in this module, so the CLI output keeps one visual language:
//!
//! ```text
//! ┏ yearglance v0.3.0 ━━╸
//! ┃
//! ┣ Loaded configuration
//! ┃   Tick interval: 1000ms
//! ┃
//! ┣[INFO] Received interrupt signal
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - `log_block_start!` opens a new conceptual block (blank pipe, then `┣ message`).
//! - `log_decorated!` continues the current block.
//! - `log_indented!` lists details that belong to the line above it.
//! - `log_pipe!` inserts spacing before a semantic message such as `log_warning!`.
//! - `log_version!` and `log_end!` bracket the whole run.
//! - `log_info!`, `log_warning!`, `log_error!`, `log_debug!` and `log_critical!`
//!   carry a `[LEVEL]` tag and are used where the level matters more than the layout.
//!
//! Output can be switched off at runtime (the live dashboard owns the screen)
//! or routed to a file with [`Log::start_file_logging`].

use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};
use std::thread::JoinHandle;

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

// Installed once when --log is active
static LOG_CHANNEL: OnceLock<Sender<LogMessage>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Line layouts understood by [`Log::emit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Version,
    BlockStart,
    Decorated,
    Indented,
    Pipe,
    End,
    Info,
    Debug,
    Warning,
    WarningStandalone,
    Error,
    ErrorExit,
    Critical,
}

impl Layout {
    /// Render a message with the given timestamp prefix.
    pub fn render(self, prefix: &str, message: &str) -> String {
        match self {
            Layout::Version => format!(
                "{prefix}┏ {} v{} ━━╸\n",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
            Layout::BlockStart => format!("{prefix}┃\n{prefix}┣ {message}\n"),
            Layout::Decorated => format!("{prefix}┣ {message}\n"),
            Layout::Indented => format!("{prefix}┃   {message}\n"),
            Layout::Pipe => format!("{prefix}┃\n"),
            Layout::End => format!("{prefix}╹\n"),
            Layout::Info => format!("{prefix}┣[\x1b[32mINFO\x1b[0m] {message}\n"),
            Layout::Debug => format!("{prefix}┣[\x1b[32mDEBUG\x1b[0m] {message}\n"),
            Layout::Warning => format!("{prefix}┣[\x1b[33mWARNING\x1b[0m] {message}\n"),
            Layout::WarningStandalone => format!("{prefix}[\x1b[33mWARNING\x1b[0m] {message}\n"),
            Layout::Error => format!("{prefix}┣[\x1b[31mERROR\x1b[0m] {message}\n"),
            Layout::ErrorExit => format!("{prefix}┃\n{prefix}┗[\x1b[31mERROR\x1b[0m] {message}\n"),
            Layout::Critical => format!("{prefix}┣[\x1b[31mCRITICAL\x1b[0m] {message}\n"),
        }
    }
}

/// Main logging interface.
pub struct Log;

impl Log {
    /// Enable or disable logging.
    ///
    /// The live dashboard disables logging while it draws so stray lines
    /// from the signal thread do not tear the screen.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Whether output is being routed to a log file.
    pub fn is_file_logging() -> bool {
        LOG_CHANNEL.get().is_some()
    }

    /// Start file logging to the specified path.
    ///
    /// Lines are written by a background thread with ANSI colour codes
    /// stripped. The returned guard flushes and joins the writer on drop.
    pub fn start_file_logging(path: PathBuf) -> anyhow::Result<LoggerGuard> {
        let file = std::fs::File::create(&path)
            .map_err(|e| anyhow::anyhow!("Failed to create log file {}: {e}", path.display()))?;

        let (tx, rx) = channel();
        LOG_CHANNEL
            .set(tx.clone())
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::spawn(move || {
            let mut writer = std::io::BufWriter::new(file);
            while let Ok(LogMessage::Formatted(text)) = rx.recv() {
                writer.write_all(text.as_bytes())?;
            }
            writer.flush()?;
            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    /// Timestamp prefix shown while running on simulated time.
    ///
    /// Empty for real time, `[YYYY-MM-DD HH:MM:SS] ` otherwise. The date is
    /// included because simulations usually cross a midnight.
    pub fn get_timestamp_prefix() -> String {
        if crate::time_source::is_initialized() && crate::time_source::is_simulated() {
            format!("[{}] ", crate::time_source::now().format("%Y-%m-%d %H:%M:%S"))
        } else {
            String::new()
        }
    }

    /// Format and route one message. Used by the logging macros.
    pub fn emit(layout: Layout, message: &str) {
        let prefix = Self::get_timestamp_prefix();
        write_output(&layout.render(&prefix, message));
    }
}

/// Guard for file logging that ensures the writer thread drains on exit.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Remove `ESC [ ... m` colour sequences.
pub(crate) fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Route rendered text to the log file when one is active, else stdout.
pub fn write_output(text: &str) {
    if let Some(tx) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(text)));
    } else {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

// # Logging Macros

#[doc(hidden)]
#[macro_export]
macro_rules! __log_with {
    ($layout:ident, $message:expr) => {{
        use $crate::common::logger::{Layout, Log};
        if Log::is_enabled() {
            Log::emit(Layout::$layout, &$message);
        }
    }};
}

/// Log a block start message, opening a new conceptual block.
#[macro_export]
macro_rules! log_block_start {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_with!(BlockStart, format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_with!(BlockStart, format!("{}", $expr))
    };
}

/// Log a message that continues the current block.
#[macro_export]
macro_rules! log_decorated {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_with!(Decorated, format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_with!(Decorated, format!("{}", $expr))
    };
}

/// Log an indented detail line.
#[macro_export]
macro_rules! log_indented {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_with!(Indented, format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_with!(Indented, format!("{}", $expr))
    };
}

/// Log an empty pipe for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::__log_with!(Pipe, String::new())
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::__log_with!(Version, String::new())
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::__log_with!(End, String::new())
    };
}

/// Log an informational message.
#[macro_export]
macro_rules! log_info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_with!(Info, format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_with!(Info, format!("{}", $expr))
    };
}

/// Log a debug message.
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_with!(Debug, format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_with!(Debug, format!("{}", $expr))
    };
}

/// Log a warning inside the pipe structure.
#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_with!(Warning, format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_with!(Warning, format!("{}", $expr))
    };
}

/// Log a warning outside the pipe structure (before `log_version!` has run).
#[macro_export]
macro_rules! log_warning_standalone {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_with!(WarningStandalone, format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_with!(WarningStandalone, format!("{}", $expr))
    };
}

/// Log an error inside the pipe structure.
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_with!(Error, format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_with!(Error, format!("{}", $expr))
    };
}

/// Log an error that terminates the flow (`┗[ERROR]`).
#[macro_export]
macro_rules! log_error_exit {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_with!(ErrorExit, format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_with!(ErrorExit, format!("{}", $expr))
    };
}

/// Log a critical message.
#[macro_export]
macro_rules! log_critical {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_with!(Critical, format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_with!(Critical, format!("{}", $expr))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_codes() {
        assert_eq!(
            strip_ansi_codes("┣[\x1b[33mWARNING\x1b[0m] careful"),
            "┣[WARNING] careful"
        );
        assert_eq!(strip_ansi_codes("plain text"), "plain text");
        // A lone escape without a CSI introducer is kept
        assert_eq!(strip_ansi_codes("a\x1bb"), "a\x1bb");
    }

    #[test]
    fn test_layout_render() {
        assert_eq!(Layout::Decorated.render("", "hello"), "┣ hello\n");
        assert_eq!(Layout::Indented.render("", "detail"), "┃   detail\n");
        assert_eq!(Layout::BlockStart.render("", "start"), "┃\n┣ start\n");
        assert_eq!(Layout::Pipe.render("", "ignored"), "┃\n");
        assert_eq!(Layout::End.render("", ""), "╹\n");
    }

    #[test]
    fn test_layout_render_with_prefix() {
        let prefix = "[2025-12-31 23:59:59] ";
        assert_eq!(
            Layout::BlockStart.render(prefix, "Midnight"),
            "[2025-12-31 23:59:59] ┃\n[2025-12-31 23:59:59] ┣ Midnight\n"
        );
    }

    #[test]
    fn test_version_header_names_package() {
        let header = Layout::Version.render("", "");
        assert!(header.starts_with("┏ yearglance v"));
        assert!(header.ends_with("━━╸\n"));
    }
}
