//! Core application logic and the main loop.
//!
//! `Core` owns the dashboard for the lifetime of a run. Each loop iteration:
//!
//! - pumps the dashboard scheduler with the current wall clock and monotonic time
//! - redraws when a metric was recomputed or an animation moved
//! - waits on the signal channel until the next scheduled wake-up
//!
//! Signals and key presses arrive on the same channel as [`SignalMessage`]s,
//! so a quit key, SIGTERM and a config reload are all handled between pumps.

pub mod scheduler;

use anyhow::{Context, Result};
use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use crate::{
    common::{
        constants::SIGNAL_CHECK_INTERVAL_MS,
        logger::Log,
        utils::{self, ProgressBar, TerminalGuard},
    },
    config::{self, Config},
    dashboard::{Dashboard, DashboardSettings, render},
    io::keyboard::KeyboardListener,
    io::signals::{SignalMessage, SignalState},
    time_source,
};

/// Parameters for creating a Core instance.
pub(crate) struct CoreParams {
    pub config: Config,
    pub signal_state: SignalState,
    pub debug_enabled: bool,
    /// Present when the dashboard draws full-screen; `None` prints plain lines
    pub terminal: Option<TerminalGuard>,
}

/// Main loop state.
pub(crate) struct Core {
    config: Config,
    signal_state: SignalState,
    debug_enabled: bool,
    terminal: Option<TerminalGuard>,
    keyboard: Option<KeyboardListener>,
    dashboard: Dashboard,
    bar: ProgressBar,
}

impl Core {
    /// Create a new Core, capturing the first set of metrics immediately.
    pub fn new(params: CoreParams) -> Self {
        let live = params.terminal.is_some();
        let dashboard = Dashboard::new(
            dashboard_settings(&params.config, live),
            &time_source::now(),
            time_source::monotonic(),
        );

        Self {
            bar: ProgressBar::new(params.config.progress_bar_width()),
            config: params.config,
            signal_state: params.signal_state,
            debug_enabled: params.debug_enabled,
            terminal: params.terminal,
            keyboard: None,
            dashboard,
        }
    }

    /// Run the dashboard until shutdown is requested.
    ///
    /// Cleanup happens whether or not the loop returned an error: every
    /// pending callback is cancelled, the terminal is restored and logging
    /// is switched back on before the error propagates.
    pub fn execute(mut self) -> Result<()> {
        if let Some(custom_dir) = config::get_custom_config_dir() {
            log_block_start!("Base directory: {}", utils::private_path(&custom_dir));
        }

        self.config.log_config();

        if self.debug_enabled {
            log_pipe!();
            log_debug!(
                "Dashboard armed with {} pending callbacks",
                self.dashboard.pending_callbacks()
            );
        }

        let live = self.terminal.is_some();
        if live {
            log_block_start!("Starting dashboard...");
            // The screen belongs to the dashboard now, unless logs go to a file
            if !Log::is_file_logging() {
                Log::set_enabled(false);
            }
            self.keyboard = Some(KeyboardListener::spawn(
                self.signal_state.signal_sender.clone(),
            ));
        } else {
            log_block_start!("No terminal detected, printing one line per update");
        }

        let result = self.redraw(true).and_then(|_| self.main_loop());

        self.dashboard.teardown();
        self.keyboard = None;
        self.terminal = None;
        Log::set_enabled(true);

        result?;

        if time_source::simulation_ended() {
            log_block_start!("Simulation complete");
        }
        log_block_start!("Dashboard stopped");
        log_end!();
        Ok(())
    }

    fn main_loop(&mut self) -> Result<()> {
        let check_interval = Duration::from_millis(SIGNAL_CHECK_INTERVAL_MS);

        while self.signal_state.is_running() && !time_source::simulation_ended() {
            let now = time_source::now();
            let mono = time_source::monotonic();

            let outcome = self.dashboard.pump(&now, mono);
            if self.terminal.is_some() {
                if outcome.needs_redraw() {
                    self.redraw(false)?;
                }
            } else if outcome.recomputed {
                self.redraw(true)?;
            }

            let wait = self
                .dashboard
                .next_wake(mono)
                .map_or(check_interval, |wake| wake.min(check_interval));

            let message = if time_source::is_simulated() {
                // Simulated sleep advances the clock the dashboard reads
                time_source::sleep(wait);
                self.signal_state.signal_receiver.try_recv().ok()
            } else {
                match self.signal_state.signal_receiver.recv_timeout(wait) {
                    Ok(message) => Some(message),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => {
                        log_critical!("Signal channel closed, stopping");
                        self.signal_state.request_shutdown();
                        None
                    }
                }
            };

            if let Some(message) = message {
                self.handle_message(message)?;
                // Anything queued behind it is handled before the next pump
                while self.signal_state.is_running()
                    && let Ok(message) = self.signal_state.signal_receiver.try_recv()
                {
                    self.handle_message(message)?;
                }
            }
        }

        Ok(())
    }

    fn handle_message(&mut self, message: SignalMessage) -> Result<()> {
        match message {
            SignalMessage::Shutdown => {
                self.signal_state.request_shutdown();
            }
            SignalMessage::Refresh => {
                self.dashboard.refresh(&time_source::now());
                self.redraw(true)?;
            }
            SignalMessage::Reload => {
                self.reload_config();
                self.redraw(true)?;
            }
        }
        Ok(())
    }

    /// Re-read the config file. An invalid file leaves the running settings untouched.
    fn reload_config(&mut self) {
        match config::load() {
            Ok(new_config) => {
                self.dashboard.apply_settings(
                    dashboard_settings(&new_config, self.terminal.is_some()),
                    &time_source::now(),
                    time_source::monotonic(),
                );
                self.bar = ProgressBar::new(new_config.progress_bar_width());
                self.config = new_config;

                log_block_start!("Configuration reloaded");
                if self.debug_enabled {
                    self.config.log_config();
                }
            }
            Err(e) => {
                log_pipe!();
                log_error!("Failed to reload configuration: {e}");
                log_indented!("Keeping the previous settings");
            }
        }
    }

    /// Draw the full screen, or print one plain line when headless.
    ///
    /// Headless output only happens for recomputes (`recomputed = true`);
    /// animation frames have nothing to show without a screen.
    fn redraw(&self, recomputed: bool) -> Result<()> {
        if self.terminal.is_some() {
            let lines = render::layout(&self.dashboard, self.bar);
            let mut out = io::stdout().lock();
            render::draw(&mut out, &lines, self.config.color())
                .context("failed to draw dashboard")?;
        } else if recomputed {
            println!("{}", render::plain_line(&self.dashboard));
        }
        Ok(())
    }

    #[cfg(test)]
    fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }
}

/// Without a screen there is nothing to animate, so values snap to their targets.
fn dashboard_settings(config: &Config, live: bool) -> DashboardSettings {
    let settings = DashboardSettings::from(config);
    if live {
        settings
    } else {
        DashboardSettings {
            animate: false,
            ..settings
        }
    }
}
