use std::sync::mpsc;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Tabs};
use ratatui::Frame;

use crate::timer::engine::{PomodoroTimer, TimerState};
use crate::timer::mode::{Mode, INK};
use crate::timer::scheduler::Scheduler;
use crate::tui::event::{AppEvent, EventHandler};
use crate::tui::widgets::alert::AlertPopup;
use crate::tui::widgets::clock::ClockWidget;
use crate::tui::widgets::ring::{square, ProgressRing};
use crate::tui::Tui;

/// What a key press asks the timer screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Toggle,
    Reset,
    Switch(Mode),
    SwitchOther,
    Quit,
}

fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('w') => Some(Action::Switch(Mode::Work)),
        KeyCode::Char('b') => Some(Action::Switch(Mode::Break)),
        KeyCode::Tab => Some(Action::SwitchOther),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

fn dismisses_alert(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
}

/// Run the timer screen until the user quits.
///
/// Completion alerts arrive on `alerts` and block the screen until they are
/// dismissed: no ticks are polled and no controls apply while one is shown.
pub fn run<S: Scheduler>(
    terminal: &mut Tui,
    timer: &mut PomodoroTimer<S>,
    alerts: &mpsc::Receiver<String>,
    frame_rate: Duration,
) -> anyhow::Result<()> {
    let events = EventHandler::new(frame_rate);
    let mut modal: Option<String> = None;

    loop {
        advance(&mut modal, timer, alerts);

        let state = timer.state();
        terminal.draw(|frame| render(frame, &state, modal.as_deref()))?;

        // Wake for the next countdown tick even if no input arrives.
        let timeout = match (&modal, timer.next_deadline()) {
            (None, Some(deadline)) => deadline
                .saturating_duration_since(Instant::now())
                .min(frame_rate),
            _ => frame_rate,
        };

        let Some(event) = events.next_timeout(timeout)? else {
            continue;
        };

        let AppEvent::Key(key) = event else {
            continue;
        };
        if key.kind == KeyEventKind::Press && on_key(&mut modal, timer, key.code) {
            break;
        }
    }

    Ok(())
}

/// Apply due ticks and pick up a new alert. Frozen while an alert is shown.
fn advance<S: Scheduler>(
    modal: &mut Option<String>,
    timer: &mut PomodoroTimer<S>,
    alerts: &mpsc::Receiver<String>,
) {
    if modal.is_none() {
        timer.poll();
        *modal = alerts.try_recv().ok();
    }
}

/// Handle one key press. Returns true when the screen should close.
///
/// An open alert swallows every key; the dismiss keys also close it.
fn on_key<S: Scheduler>(
    modal: &mut Option<String>,
    timer: &mut PomodoroTimer<S>,
    code: KeyCode,
) -> bool {
    if modal.is_some() {
        if dismisses_alert(code) {
            *modal = None;
        }
        return false;
    }

    match action_for(code) {
        Some(Action::Toggle) => timer.toggle_running(),
        Some(Action::Reset) => timer.reset(),
        Some(Action::Switch(mode)) => timer.switch_mode(mode),
        Some(Action::SwitchOther) => {
            let other = timer.state().mode.other();
            timer.switch_mode(other);
        }
        Some(Action::Quit) => return true,
        None => {}
    }
    false
}

fn render(frame: &mut Frame, state: &TimerState, modal: Option<&str>) {
    let palette = state.mode.palette();
    let area = frame.area();

    let backdrop = Block::default().style(Style::default().bg(palette.background).fg(INK));
    frame.render_widget(backdrop, area);

    let rows = Layout::vertical([
        Constraint::Length(1), // top margin
        Constraint::Length(1), // mode tabs
        Constraint::Min(6),    // ring
        Constraint::Length(1), // key hint
    ])
    .split(area);

    render_tabs(frame, rows[1], state.mode);

    let ring_area = rows[2];
    frame.render_widget(
        ProgressRing::new(state.remaining_secs, state.total_secs())
            .accent(palette.accent)
            .track(INK)
            .background(palette.background)
            .breathing(state.running),
        ring_area,
    );

    let face = square(ring_area);
    if face.height >= 2 {
        let clock_area = Rect {
            y: face.y + face.height / 2 - 1,
            height: 2,
            ..face
        };
        frame.render_widget(
            ClockWidget::new(state.remaining_secs, palette.label)
                .running(state.running)
                .color(INK),
            clock_area,
        );
    }

    render_hint(frame, rows[3], state, palette.accent);

    if let Some(message) = modal {
        frame.render_widget(AlertPopup::new(message).accent(palette.accent), area);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, mode: Mode) {
    let titles = Mode::ALL.map(|m| m.palette().tab.to_uppercase());
    let selected = Mode::ALL.iter().position(|m| *m == mode).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(INK).add_modifier(Modifier::DIM))
        .highlight_style(Style::default().fg(INK).add_modifier(Modifier::BOLD))
        .divider("   ");

    // Centre the tab strip.
    let [strip] = Layout::horizontal([Constraint::Length(19)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(tabs, strip);
}

fn render_hint(frame: &mut Frame, area: Rect, state: &TimerState, accent: Color) {
    let key = Style::default().fg(accent).add_modifier(Modifier::BOLD);
    let toggle = if state.running { " pause  " } else { " start  " };

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("  [Space]", key),
        Span::raw(toggle),
        Span::styled("[r]", key),
        Span::raw(" reset  "),
        Span::styled("[Tab]", key),
        Span::raw(" mode  "),
        Span::styled("[q]", key),
        Span::raw(" quit"),
    ]));
    frame.render_widget(hint, area);
}
