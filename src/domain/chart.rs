//! Chart series derivation
//!
//! The chart endpoint returns records newest first. Every fetch rebuilds the series
//! from scratch; nothing is appended incrementally.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::number::GeneratedNumber;

/// Number of most recent records plotted by default
pub const DEFAULT_CHART_LEN: usize = 20;

/// Left-to-right ordering of the plotted records
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ChartOrder {
    /// Time flows left to right, the most recent record is the last point
    #[default]
    #[value(alias = "oldest")]
    OldestFirst,
    /// The most recent record is the first point
    #[value(alias = "newest")]
    NewestFirst,
}

impl ChartOrder {
    pub fn axis_title(&self) -> &'static str {
        match self {
            ChartOrder::OldestFirst => "Oldest → Most Recent",
            ChartOrder::NewestFirst => "Most Recent → Oldest",
        }
    }
}

/// Labels and values of the line chart. Label `#1` is always the most recent record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
    pub order: ChartOrder,
}

impl ChartSeries {
    /// Build a series from records ordered newest first, keeping at most `len` of them
    pub fn from_newest_first(records: &[GeneratedNumber], len: usize, order: ChartOrder) -> Self {
        let recent = &records[..records.len().min(len)];
        let mut ranked: Vec<(String, i64)> = recent
            .iter()
            .enumerate()
            .map(|(i, n)| (format!("#{}", i + 1), n.value))
            .collect();
        if order == ChartOrder::OldestFirst {
            ranked.reverse();
        }
        let (labels, values) = ranked.into_iter().unzip();
        Self {
            labels,
            values,
            order,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(x, y)` points for the chart widget, x being the position in the series
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v as f64))
            .collect()
    }

    /// Value of the most recent record
    pub fn latest(&self) -> Option<i64> {
        match self.order {
            ChartOrder::OldestFirst => self.values.last().copied(),
            ChartOrder::NewestFirst => self.values.first().copied(),
        }
    }
}
