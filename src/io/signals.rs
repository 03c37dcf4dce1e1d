//! Unix signal handling for yearglance.
//!
//! A dedicated thread owns the `signal-hook` iterator and turns signals into
//! [`SignalMessage`]s on an mpsc channel. The main loop is the only consumer;
//! the keyboard thread sends into the same channel.
//!
//! | Signal                   | Message    |
//! |--------------------------|------------|
//! | SIGINT, SIGTERM, SIGHUP  | `Shutdown` |
//! | SIGUSR1                  | `Refresh`  |
//! | SIGUSR2                  | `Reload`   |

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR1, SIGUSR2},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    sync::mpsc::{Receiver, Sender},
    thread,
};

/// Unified message type for everything that interrupts the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMessage {
    /// Leave the main loop (SIGINT, SIGTERM, SIGHUP, `q`, `Esc`, `Ctrl+C`)
    Shutdown,
    /// Recompute all metrics now (SIGUSR1, `r`)
    Refresh,
    /// Re-read the configuration file, then refresh (SIGUSR2)
    Reload,
}

/// Signal handling state shared between threads
pub struct SignalState {
    /// Atomic flag indicating if the application should keep running
    pub running: Arc<AtomicBool>,
    /// Channel receiver for signal messages, read by the main loop
    pub signal_receiver: Receiver<SignalMessage>,
    /// Channel sender, cloned for the keyboard thread
    pub signal_sender: Sender<SignalMessage>,
}

impl SignalState {
    /// Signal state with no OS handlers attached, for tests and one-shot commands.
    pub fn detached() -> Self {
        let (signal_sender, signal_receiver) = std::sync::mpsc::channel();
        Self {
            running: Arc::new(AtomicBool::new(true)),
            signal_receiver,
            signal_sender,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn request_shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Register the signal handlers and start the signal thread.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let state = SignalState::detached();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR1, SIGUSR2])
        .context("failed to register signal handlers")?;

    let running_clone = state.running.clone();
    let signal_sender_clone = state.signal_sender.clone();

    thread::spawn(move || {
        for sig in signals.forever() {
            match sig {
                SIGUSR1 => {
                    if debug_enabled {
                        log_pipe!();
                        log_debug!("Received SIGUSR1, refreshing metrics");
                    }
                    if signal_sender_clone.send(SignalMessage::Refresh).is_err() {
                        break;
                    }
                }
                SIGUSR2 => {
                    log_pipe!();
                    log_info!("Received configuration reload signal");
                    if signal_sender_clone.send(SignalMessage::Reload).is_err() {
                        break;
                    }
                }
                SIGINT | SIGTERM | SIGHUP => {
                    log_pipe!();
                    match sig {
                        SIGINT if debug_enabled => {
                            log_info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...")
                        }
                        SIGINT => log_info!("Received interrupt signal, initiating graceful shutdown..."),
                        SIGHUP => log_info!("Received hangup signal, shutting down..."),
                        _ => log_info!("Received termination request, initiating graceful shutdown..."),
                    }

                    // Send shutdown message to main loop first
                    if let Err(e) = signal_sender_clone.send(SignalMessage::Shutdown) {
                        log_warning!("Failed to send shutdown message: {e}");
                    }

                    running_clone.store(false, Ordering::SeqCst);
                    break;
                }
                _ => {}
            }
        }
    });

    Ok(state)
}
