use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::domain::number::GeneratedNumber;

pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current page of generated numbers: id, value and creation time
pub struct NumberTableWidget<'a> {
    rows: &'a [GeneratedNumber],
    loading: bool,
    header_style: Style,
}

impl<'a> NumberTableWidget<'a> {
    pub fn new(rows: &'a [GeneratedNumber]) -> Self {
        Self {
            rows,
            loading: false,
            header_style: Style::default().bold(),
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    fn title(&self) -> &'static str {
        if self.loading {
            " Numbers (loading…) "
        } else {
            " Numbers "
        }
    }
}

impl Widget for NumberTableWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(self.title());

        if self.rows.is_empty() {
            let placeholder = if self.loading {
                "Loading…"
            } else {
                "No numbers yet. Press g to generate one."
            };
            Paragraph::new(placeholder)
                .alignment(Alignment::Center)
                .block(block)
                .render(area, buf);
            return;
        }

        let header = Row::new(["ID", "Value", "Created At"]).style(self.header_style);
        let rows = self.rows.iter().map(|n| {
            Row::new([
                Cell::from(n.id.to_string()),
                Cell::from(Text::from(n.value.to_string()).alignment(Alignment::Right)),
                Cell::from(n.created_at.format(CREATED_AT_FORMAT).to_string()),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Length(7),
                Constraint::Min(19),
            ],
        )
        .header(header)
        .column_spacing(2)
        .block(block);
        Widget::render(table, area, buf);
    }
}
