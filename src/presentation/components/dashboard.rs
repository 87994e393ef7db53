//! Dashboard component
//!
//! Lays out the header, the paginated table, the chart and the status line,
//! and overlays the modal when a number was just generated.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::{
    core::state::AppState,
    presentation::{
        config::keybindings::{Action, KeyBindings},
        widgets::{
            number_chart::NumberChartWidget, number_modal::NumberModalWidget,
            number_table::NumberTableWidget, paginator::PaginatorWidget,
            status_bar::StatusBarWidget,
        },
    },
};

const HINT_ACTIONS: [(Action, &str); 5] = [
    (Action::Generate, "generate"),
    (Action::Refresh, "refresh"),
    (Action::PreviousPage, "prev"),
    (Action::NextPage, "next"),
    (Action::Quit, "quit"),
];

#[derive(Debug, Default)]
pub struct DashboardComponent {
    hints: Option<String>,
}

impl DashboardComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&mut self, state: &AppState, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let hints = self
            .hints
            .get_or_insert_with(|| key_hints(&state.config.config.keybindings))
            .as_str();

        let [header_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let header = if state.generation.is_generating() {
            " Random Number Dashboard · generating…"
        } else {
            " Random Number Dashboard"
        };
        frame.render_widget(
            Paragraph::new(header).style(styles.get_or_default("header")),
            header_area,
        );

        let [table_area, chart_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(body_area);
        let [rows_area, paginator_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(table_area);

        let list = &state.list;
        let page = list.page();
        frame.render_widget(
            NumberTableWidget::new(page.rows())
                .loading(list.is_loading())
                .header_style(styles.get_or_default("table_header")),
            rows_area,
        );

        // The paginator follows the requested page so navigation feels immediate
        let cursor = list.cursor();
        frame.render_widget(
            PaginatorWidget::new(page.total_count, cursor.index, cursor.size)
                .disabled_style(styles.get_or_default("disabled")),
            paginator_area,
        );

        frame.render_widget(
            NumberChartWidget::new(state.chart.series())
                .loading(state.chart.is_loading())
                .line_style(styles.get_or_default("chart_line")),
            chart_area,
        );

        frame.render_widget(
            StatusBarWidget::new(state.system.status_message.as_deref(), hints)
                .busy(state.is_busy()),
            status_area,
        );

        if let (true, Some(value)) = (state.modal.open, state.modal.value) {
            frame.render_widget(
                NumberModalWidget::new(value)
                    .border_style(styles.get_or_default("modal_border"))
                    .value_style(styles.get_or_default("modal_value")),
                area,
            );
        }
    }
}

/// `g generate  r refresh ...` built from the first key bound to each action
pub fn key_hints(bindings: &KeyBindings) -> String {
    HINT_ACTIONS
        .iter()
        .filter_map(|(action, label)| {
            bindings.keys_for(*action).into_iter().next().map(|key| {
                let key = key.trim_start_matches('<').trim_end_matches('>').to_string();
                format!("{key} {label}")
            })
        })
        .collect::<Vec<_>>()
        .join("  ")
        + " "
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    use crate::{
        core::msg::{list::ListMsg, modal::ModalMsg},
        domain::number::{GeneratedNumber, ListResponse},
        presentation::config::keybindings::parse_key_sequence,
    };

    fn render(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut component = DashboardComponent::new();
        terminal
            .draw(|f| component.view(state, f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn loaded_state(count: u64) -> AppState {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut state = AppState::default();
        state.list.update(ListMsg::Load);
        state.list.update(ListMsg::Fetched {
            seq: 1,
            result: Ok(ListResponse {
                results: (0..count.min(10))
                    .map(|i| GeneratedNumber::new(count - i, 11 + i as i64, at))
                    .collect(),
                count,
            }),
        });
        state
    }

    #[test]
    fn test_renders_table_and_paginator() {
        let text = render(&loaded_state(25), 120, 20);
        assert!(text.contains("Random Number Dashboard"));
        assert!(text.contains("1 – 10 of 25"));
        assert!(text.contains("Created At"));
    }

    #[test]
    fn test_renders_modal_when_open() {
        let mut state = loaded_state(3);
        state.modal.update(ModalMsg::Open(88));
        let text = render(&state, 120, 20);
        assert!(text.contains("New Number Generated"));
        assert!(text.contains("88"));
    }

    #[test]
    fn test_key_hints() {
        let bindings = KeyBindings(
            [("<g>", Action::Generate), ("<q>", Action::Quit)]
                .into_iter()
                .map(|(k, a)| (parse_key_sequence(k).unwrap(), a))
                .collect(),
        );
        assert_eq!(key_hints(&bindings), "g generate  q quit ");
    }
}
