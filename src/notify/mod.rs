//! Side effects the timer asks its host for: sound, alerts and chrome tint.
//!
//! Each one is a small trait so the timer core can run against no-op or
//! recording implementations in tests, and against the real terminal,
//! audio device and desktop in the app.

pub mod desktop;
pub mod sound;
pub mod tint;

use std::sync::mpsc;

use crate::timer::mode::{Mode, Palette};

/// Fire-and-forget playback of the completion cue.
pub trait SoundPlayer {
    /// Start playback. Must not wait for the sound to finish.
    fn play(&self) -> anyhow::Result<()>;
}

/// Surfaces a completion message to the user.
pub trait Alerter {
    fn alert(&mut self, message: &str);
}

/// Host hint for the mode's colours (terminal background, status bar...).
pub trait ThemeNotifier {
    fn apply(&mut self, palette: &Palette);
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Box<T> {
    fn play(&self) -> anyhow::Result<()> {
        (**self).play()
    }
}

impl<T: Alerter + ?Sized> Alerter for Box<T> {
    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }
}

impl<T: ThemeNotifier + ?Sized> ThemeNotifier for Box<T> {
    fn apply(&mut self, palette: &Palette) {
        (**self).apply(palette)
    }
}

/// Player that never makes a sound.
#[derive(Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Theme notifier that ignores palette changes.
#[derive(Debug, Default)]
pub struct NoTint;

impl ThemeNotifier for NoTint {
    fn apply(&mut self, _palette: &Palette) {}
}

/// Posts alert messages to whoever holds the receiving end.
///
/// The timer screen drains the receiver each frame and shows a modal popup.
pub struct ChannelAlerter {
    tx: mpsc::Sender<String>,
}

impl ChannelAlerter {
    pub fn new() -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl Alerter for ChannelAlerter {
    fn alert(&mut self, message: &str) {
        if self.tx.send(message.to_string()).is_err() {
            tracing::warn!("alert receiver gone, dropping {:?}", message);
        }
    }
}

/// Forwards every alert to each inner alerter in order.
#[derive(Default)]
pub struct Alerters {
    inner: Vec<Box<dyn Alerter>>,
}

impl Alerters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, alerter: impl Alerter + 'static) -> Self {
        self.inner.push(Box::new(alerter));
        self
    }
}

impl Alerter for Alerters {
    fn alert(&mut self, message: &str) {
        for alerter in &mut self.inner {
            alerter.alert(message);
        }
    }
}

/// Plays the cue and raises the alert when a countdown reaches zero.
pub struct CompletionNotifier {
    sound: Box<dyn SoundPlayer>,
    alerter: Box<dyn Alerter>,
}

impl CompletionNotifier {
    pub fn new(sound: impl SoundPlayer + 'static, alerter: impl Alerter + 'static) -> Self {
        Self {
            sound: Box::new(sound),
            alerter: Box::new(alerter),
        }
    }

    pub fn fire(&mut self, mode: Mode) {
        // Playback failures are logged and dropped.
        if let Err(e) = self.sound.play() {
            tracing::debug!("alert sound failed: {e:#}");
        }
        self.alerter.alert(mode.completion_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Broken;

    impl SoundPlayer for Broken {
        fn play(&self) -> anyhow::Result<()> {
            anyhow::bail!("autoplay blocked")
        }
    }

    struct Counting(Rc<Cell<usize>>);

    impl SoundPlayer for Counting {
        fn play(&self) -> anyhow::Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    struct Recording(Rc<RefCell<Vec<String>>>);

    impl Alerter for Recording {
        fn alert(&mut self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn fire_plays_and_alerts() {
        let plays = Rc::new(Cell::new(0));
        let (alerter, rx) = ChannelAlerter::new();
        let mut notifier = CompletionNotifier::new(Counting(plays.clone()), alerter);

        notifier.fire(Mode::Work);

        assert_eq!(plays.get(), 1);
        assert_eq!(rx.try_recv().unwrap(), "Focus Session Done!");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn sound_failure_is_swallowed() {
        let (alerter, rx) = ChannelAlerter::new();
        let mut notifier = CompletionNotifier::new(Broken, alerter);

        notifier.fire(Mode::Break);

        assert_eq!(rx.try_recv().unwrap(), "Break Over!");
    }

    #[test]
    fn alerters_fan_out_in_order() {
        let a = Rc::new(RefCell::new(Vec::new()));
        let b = Rc::new(RefCell::new(Vec::new()));
        let mut all = Alerters::new()
            .with(Recording(a.clone()))
            .with(Recording(b.clone()));

        all.alert("Break Over!");

        assert_eq!(*a.borrow(), vec!["Break Over!"]);
        assert_eq!(*b.borrow(), vec!["Break Over!"]);
    }

    #[test]
    fn channel_alerter_survives_dropped_receiver() {
        let (mut alerter, rx) = ChannelAlerter::new();
        drop(rx);
        alerter.alert("Focus Session Done!");
    }
}
