//! Application coordinator that manages the lifecycle of a dashboard run.
//!
//! Resource acquisition happens here, in order: headers, signal handlers,
//! configuration, terminal. The loop itself lives in [`crate::core`].
//!
//! - Normal startup: `Yearglance::new(debug_enabled).run()`
//! - Simulation mode: `Yearglance::new(debug_enabled).without_headers().run()`

use anyhow::{Context, Result};

use crate::{
    common::utils::TerminalGuard,
    config,
    core::{Core, CoreParams},
    io::signals::setup_signal_handler,
};

/// Builder for configuring and running the dashboard.
///
/// # Examples
///
/// ```no_run
/// use yearglance::Yearglance;
///
/// # fn main() -> anyhow::Result<()> {
/// Yearglance::new(false).run()?;
///
/// // Simulation mode prints its own header first
/// Yearglance::new(true).without_headers().run()?;
/// # Ok(())
/// # }
/// ```
pub struct Yearglance {
    debug_enabled: bool,
    show_headers: bool,
}

impl Yearglance {
    /// Create a new runner with defaults matching normal run
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            show_headers: true,
        }
    }

    /// Skip header display (the simulation header is already printed)
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    /// Execute the application until a quit key or termination signal.
    pub fn run(self) -> Result<()> {
        if self.show_headers {
            log_version!();
        }

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled");
        }

        let signal_state = setup_signal_handler(self.debug_enabled)?;

        // Load before touching the terminal so errors stay readable
        let config = config::load()?;

        let terminal = TerminalGuard::new().context("failed to initialize terminal")?;

        let core = Core::new(CoreParams {
            config,
            signal_state,
            debug_enabled: self.debug_enabled,
            terminal,
        });

        core.execute()
    }
}
