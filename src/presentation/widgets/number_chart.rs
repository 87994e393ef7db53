use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::domain::{
    chart::ChartSeries,
    number::{MAX_VALUE, MIN_VALUE},
};

/// Upper bound of the value axis; one past the largest generated value
pub const Y_AXIS_MAX: f64 = (MAX_VALUE + 1) as f64;

/// Line chart of the recent values. Rebuilt from the series on every frame.
pub struct NumberChartWidget<'a> {
    series: &'a ChartSeries,
    loading: bool,
    line_style: Style,
}

impl<'a> NumberChartWidget<'a> {
    pub fn new(series: &'a ChartSeries) -> Self {
        Self {
            series,
            loading: false,
            line_style: Style::default().fg(Color::Cyan),
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn line_style(mut self, style: Style) -> Self {
        self.line_style = style;
        self
    }

    fn title(&self) -> String {
        let latest = self
            .series
            .latest()
            .map(|v| format!(" (latest: {v})"))
            .unwrap_or_default();
        let loading = if self.loading { " loading…" } else { "" };
        format!(" Last {} numbers{latest}{loading} ", self.series.len())
    }

    /// First, middle and last rank labels along the x axis
    fn x_labels(&self) -> Vec<Line<'a>> {
        let series: &'a ChartSeries = self.series;
        let labels = &series.labels;
        match labels.len() {
            0 => vec![],
            1 => vec![Line::from(labels[0].as_str())],
            2 => vec![
                Line::from(labels[0].as_str()),
                Line::from(labels[1].as_str()),
            ],
            n => vec![
                Line::from(labels[0].as_str()),
                Line::from(labels[n / 2].as_str()),
                Line::from(labels[n - 1].as_str()),
            ],
        }
    }
}

impl Widget for NumberChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(self.title());

        if self.series.is_empty() {
            let placeholder = if self.loading {
                "Loading…"
            } else {
                "No data to plot"
            };
            Paragraph::new(placeholder)
                .alignment(Alignment::Center)
                .block(block)
                .render(area, buf);
            return;
        }

        let points = self.series.points();
        let x_max = (self.series.len().saturating_sub(1)).max(1) as f64;
        let datasets = vec![Dataset::default()
            .name("Random Numbers")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(self.line_style)
            .data(&points)];

        let x_axis = Axis::default()
            .title(self.series.order.axis_title())
            .style(Style::default().fg(Color::Gray))
            .bounds([0.0, x_max])
            .labels(self.x_labels());
        let y_axis = Axis::default()
            .title("Value")
            .style(Style::default().fg(Color::Gray))
            .bounds([MIN_VALUE as f64, Y_AXIS_MAX])
            .labels(["0", "50", "100"]);

        Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}
