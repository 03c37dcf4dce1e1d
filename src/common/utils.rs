//! Utility functions shared across the codebase.
//!
//! Terminal state management, text progress bars and path display helpers.

use anyhow::{Context, Result};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, IsTerminal};
use std::path::Path;

/// Manages terminal state for the live dashboard.
///
/// Switches to the alternate screen, enables raw mode so keypresses reach the
/// keyboard thread unbuffered, and hides the cursor. Everything is restored
/// when the guard is dropped, including on early returns and panics that
/// unwind.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Set up the terminal for full-screen drawing.
    ///
    /// # Returns
    /// - `Ok(Some(guard))` if stdout is a terminal and the settings were applied
    /// - `Ok(None)` if stdout is not a terminal (piped output, service managers)
    /// - `Err` only when a terminal was present but could not be configured
    pub fn new() -> Result<Option<Self>> {
        if !is_interactive() {
            return Ok(None);
        }

        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e).context("failed to enter alternate screen");
        }

        Ok(Some(Self { _private: () }))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort restore
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Whether stdout is attached to a terminal.
pub fn is_interactive() -> bool {
    io::stdout().is_terminal()
}

/// Text progress bar in the `[=====>    ]` style.
#[derive(Debug, Clone, Copy)]
pub struct ProgressBar {
    width: usize,
}

impl ProgressBar {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of filled and empty cells for a progress fraction.
    ///
    /// Progress outside `[0, 1]` is clamped.
    pub fn cells(&self, progress: f64) -> (usize, usize) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let filled = ((self.width as f64) * progress) as usize;
        (filled, self.width - filled)
    }

    /// Render the bar body without brackets.
    pub fn render(&self, progress: f64) -> String {
        let (filled, empty) = self.cells(progress);
        if filled == 0 {
            " ".repeat(self.width)
        } else {
            format!(
                "{}>{}",
                "=".repeat(filled.saturating_sub(1)),
                " ".repeat(empty)
            )
        }
    }
}

/// Display a path with the home directory replaced by `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_progress_bar_cells() {
        let bar = ProgressBar::new(10);
        assert_eq!(bar.cells(0.0), (0, 10));
        assert_eq!(bar.cells(0.5), (5, 5));
        assert_eq!(bar.cells(1.0), (10, 0));
    }

    #[test]
    fn test_progress_bar_clamps() {
        let bar = ProgressBar::new(8);
        assert_eq!(bar.cells(-0.5), (0, 8));
        assert_eq!(bar.cells(3.0), (8, 0));
        assert_eq!(bar.cells(f64::NAN), (0, 8));
    }

    #[test]
    fn test_progress_bar_render() {
        let bar = ProgressBar::new(10);
        assert_eq!(bar.render(0.0), "          ");
        assert_eq!(bar.render(0.5), "====>     ");
        assert_eq!(bar.render(1.0), "=========>");
        assert_eq!(bar.render(0.5).chars().count(), bar.width());
    }

    #[test]
    fn test_private_path_outside_home() {
        let path = PathBuf::from("/etc/yearglance/yearglance.toml");
        assert_eq!(private_path(&path), "/etc/yearglance/yearglance.toml");
    }

    #[test]
    fn test_private_path_inside_home() {
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".config").join("yearglance");
            assert_eq!(private_path(&path), "~/.config/yearglance");
            assert_eq!(private_path(&home), "~");
        }
    }
}
