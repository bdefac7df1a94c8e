use anyhow::Result;

use crate::config::AppConfig;
use crate::notify::desktop::DesktopAlerter;
use crate::notify::sound::RodioPlayer;
use crate::notify::tint::TerminalTint;
use crate::notify::{
    Alerters, ChannelAlerter, CompletionNotifier, NoTint, Silent, SoundPlayer, ThemeNotifier,
};
use crate::timer::engine::PomodoroTimer;
use crate::timer::mode::Mode;
use crate::timer::scheduler::IntervalScheduler;

/// Wire the timer to its collaborators and run the screen.
pub fn run(config: &AppConfig, mode: Mode) -> Result<()> {
    let sound: Box<dyn SoundPlayer> = if config.sound.enabled {
        Box::new(RodioPlayer::new(config.sound.file.clone(), config.sound.volume))
    } else {
        Box::new(Silent)
    };

    let (channel, alerts) = ChannelAlerter::new();
    let mut alerter = Alerters::new().with(channel);
    if config.alert.desktop {
        alerter = alerter.with(DesktopAlerter);
    }

    let theme: Box<dyn ThemeNotifier> = if config.display.terminal_tint {
        Box::new(TerminalTint::stdout())
    } else {
        Box::new(NoTint)
    };

    tracing::info!(
        mode = mode.as_str(),
        sound = config.sound.enabled,
        desktop = config.alert.desktop,
        "starting timer"
    );

    let mut terminal = crate::tui::init("tomatick")?;
    let mut timer = PomodoroTimer::new(
        IntervalScheduler::new(),
        CompletionNotifier::new(sound, alerter),
        theme,
    );
    if mode != Mode::Work {
        timer.switch_mode(mode);
    }

    let result = crate::tui::screens::pomodoro::run(
        &mut terminal,
        &mut timer,
        &alerts,
        config.display.frame_rate(),
    );

    // Drop the timer (and its tint) before leaving the alternate screen.
    drop(timer);
    crate::tui::restore()?;
    result
}
