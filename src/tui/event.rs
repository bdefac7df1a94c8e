use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyEvent};

/// Events consumed by the TUI main loop.
pub enum AppEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// Terminal was resized.
    #[allow(dead_code)]
    Resize(u16, u16),
    /// Redraw cadence when no input arrives. Not the countdown tick.
    Frame,
}

/// Polls crossterm events on a background thread and forwards them.
///
/// Sends Key and Resize events as they arrive, plus a Frame event every
/// `frame_rate` when the terminal is quiet.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _handle: std::thread::JoinHandle<()>,
}

impl EventHandler {
    /// Start the event polling thread.
    pub fn new(frame_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let handle = std::thread::spawn(move || loop {
            let event = if event::poll(frame_rate).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) => AppEvent::Key(key),
                    Ok(Event::Resize(w, h)) => AppEvent::Resize(w, h),
                    _ => continue,
                }
            } else {
                AppEvent::Frame
            };
            if tx.send(event).is_err() {
                return;
            }
        });

        Self {
            rx,
            _handle: handle,
        }
    }

    /// Wait up to `timeout` for the next event. `Ok(None)` means the wait
    /// timed out, which the caller uses to hit scheduler deadlines.
    pub fn next_timeout(&self, timeout: Duration) -> Result<Option<AppEvent>, mpsc::RecvError> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(mpsc::RecvError),
        }
    }
}
