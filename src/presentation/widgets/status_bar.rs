use ratatui::{prelude::*, widgets::Paragraph};
use unicode_width::UnicodeWidthStr;

/// Bottom line: status message on the left, key hints on the right
pub struct StatusBarWidget<'a> {
    message: Option<&'a str>,
    hints: &'a str,
    busy: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(message: Option<&'a str>, hints: &'a str) -> Self {
        Self {
            message,
            hints,
            busy: false,
        }
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    fn message_style(&self) -> Style {
        match self.message {
            Some(m) if m.starts_with("[ERR") => Style::default().fg(Color::Red),
            _ => Style::default(),
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::new(
            Direction::Horizontal,
            [Constraint::Min(0), Constraint::Length(self.hints.width() as u16)],
        )
        .split(area);

        let spinner = if self.busy { "⟳ " } else { "" };
        let message = format!("{spinner}{}", self.message.unwrap_or_default());
        Paragraph::new(Span::styled(message, self.message_style())).render(layout[0], buf);
        Paragraph::new(Span::styled(self.hints, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Right)
            .render(layout[1], buf);
    }
}
