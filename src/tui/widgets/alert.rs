use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

/// Modal popup shown when a countdown completes.
pub struct AlertPopup<'a> {
    message: &'a str,
    accent: Color,
}

impl<'a> AlertPopup<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            accent: Color::Cyan,
        }
    }

    pub fn accent(mut self, color: Color) -> Self {
        self.accent = color;
        self
    }
}

impl Widget for AlertPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.message.len() as u16 + 8).max(28).min(area.width);
        let popup = centered(area, width, 6);

        Clear.render(popup, buf);

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                self.message,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("[Enter]", Style::default().fg(self.accent).add_modifier(Modifier::BOLD)),
                Span::raw(" dismiss"),
            ]),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(" Time's up ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.accent)),
            )
            .render(popup, buf);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_contains_message() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        AlertPopup::new("Break Over!").render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Break Over!"));
        assert!(text.contains("Time's up"));
    }

    #[test]
    fn centered_rect_is_in_the_middle() {
        let r = centered(Rect::new(0, 0, 60, 20), 20, 6);
        assert_eq!(r, Rect::new(20, 7, 20, 6));
    }
}
