//! Keyboard input for the live dashboard.
//!
//! With raw mode enabled Ctrl+C no longer raises SIGINT, so key presses are
//! read on a background thread with crossterm and forwarded to the main loop
//! as [`SignalMessage`]s.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::common::constants::KEYBOARD_POLL_INTERVAL_MS;
use crate::io::signals::SignalMessage;

/// Map a key press to the message it triggers.
pub fn map_key(key: &KeyEvent) -> Option<SignalMessage> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(SignalMessage::Shutdown)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(SignalMessage::Shutdown),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(SignalMessage::Refresh),
        _ => None,
    }
}

/// Background key reader. Stops and joins when dropped.
pub struct KeyboardListener {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl KeyboardListener {
    pub fn spawn(sender: Sender<SignalMessage>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = stop.clone();

        let handle = thread::spawn(move || {
            let poll_interval = Duration::from_millis(KEYBOARD_POLL_INTERVAL_MS);
            while !stop_clone.load(Ordering::SeqCst) {
                match event::poll(poll_interval) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(_) => break,
                }

                let Ok(Event::Key(key)) = event::read() else {
                    continue;
                };

                if let Some(message) = map_key(&key) {
                    let shutdown = message == SignalMessage::Shutdown;
                    if sender.send(message).is_err() || shutdown {
                        break;
                    }
                }
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
