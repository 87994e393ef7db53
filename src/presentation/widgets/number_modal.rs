use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const TITLE: &str = " New Number Generated ";
const HINT: &str = "Press Enter or Esc to close";

/// Centered dialog showing the number that was just generated
pub struct NumberModalWidget {
    value: i64,
    border_style: Style,
    value_style: Style,
}

impl NumberModalWidget {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            border_style: Style::default().fg(Color::Green),
            value_style: Style::default().bold(),
        }
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn value_style(mut self, style: Style) -> Self {
        self.value_style = style;
        self
    }

    /// Dialog rectangle centered in `area`, sized to fit its text
    pub fn area(area: Rect) -> Rect {
        let content_width = TITLE.width().max(HINT.width()) as u16 + 4;
        let width = content_width.min(area.width);
        let height = 7.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }
}

impl Widget for NumberModalWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog = Self::area(area);
        Clear.render(dialog, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style)
            .title(TITLE)
            .title_alignment(Alignment::Center);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(self.value.to_string(), self.value_style)),
            Line::from(""),
            Line::from(Span::styled(HINT, Style::default().fg(Color::DarkGray))),
        ];
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(block)
            .render(dialog, buf);
    }
}
