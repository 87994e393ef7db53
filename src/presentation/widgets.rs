//! Reusable UI widgets
//!
//! Each widget draws one part of the dashboard from plain data it is handed;
//! none of them reads `AppState` directly.

pub mod number_chart;
pub mod number_modal;
pub mod number_table;
pub mod paginator;
pub mod status_bar;
