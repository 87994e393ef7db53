use ratatui::{prelude::*, widgets::Paragraph};
use thousands::Separable;

use crate::domain::page::{range_label, PageCursor};

/// Paginator line under the table, e.g. `Rows per page: 10   11 – 20 of 1,234   ◀ ▶`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatorWidget {
    pub total: usize,
    pub index: usize,
    pub size: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub disabled_style: Style,
}

impl PaginatorWidget {
    pub fn new(total: usize, index: usize, size: usize) -> Self {
        let cursor = PageCursor::new(index, size);
        Self {
            total,
            index,
            size,
            has_previous: cursor.has_previous(),
            has_next: cursor.has_next(total),
            disabled_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn disabled_style(mut self, style: Style) -> Self {
        self.disabled_style = style;
        self
    }

    /// Range label with thousands separators
    pub fn label(&self) -> String {
        let plain = range_label(self.total, self.index, self.size);
        // only the total can be large enough to need separators in practice
        match plain.rsplit_once(" of ") {
            Some((range, total)) => {
                let total = total
                    .parse::<usize>()
                    .map(|t| t.separate_with_commas())
                    .unwrap_or_else(|_| total.to_string());
                format!("{range} of {total}")
            }
            None => plain,
        }
    }

    fn arrow(&self, symbol: &'static str, enabled: bool) -> Span<'static> {
        if enabled {
            Span::raw(symbol)
        } else {
            Span::styled(symbol, self.disabled_style)
        }
    }
}

impl Widget for PaginatorWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::raw(format!("Rows per page: {}   ", self.size)),
            Span::raw(self.label()),
            Span::raw("   "),
            self.arrow("◀", self.has_previous),
            Span::raw(" "),
            self.arrow("▶", self.has_next),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Right)
            .render(area, buf);
    }
}
