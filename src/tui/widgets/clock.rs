use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::timer::progress::format_time;

/// Remaining time as `MM:SS` with the mode label underneath.
pub struct ClockWidget<'a> {
    remaining_secs: u32,
    label: &'a str,
    running: bool,
    color: Color,
}

impl<'a> ClockWidget<'a> {
    pub fn new(remaining_secs: u32, label: &'a str) -> Self {
        Self {
            remaining_secs,
            label,
            running: false,
            color: Color::White,
        }
    }

    pub fn running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for ClockWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = format_time(self.remaining_secs);
        let (mins, secs) = text.split_once(':').unwrap_or((text.as_str(), ""));

        let digits = Style::default().fg(self.color).add_modifier(Modifier::BOLD);
        // The colon dims while counting.
        let colon = if self.running {
            Style::default().fg(self.color).add_modifier(Modifier::DIM)
        } else {
            digits
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(mins.to_string(), digits),
                Span::styled(":", colon),
                Span::styled(secs.to_string(), digits),
            ]),
            Line::from(Span::styled(
                self.label.to_uppercase(),
                Style::default().fg(self.color).add_modifier(Modifier::DIM),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
