//! Dashboard view-model
//!
//! Everything the presentation layer draws is derived from [`AppState`]. It is
//! serializable so a snapshot of the whole dashboard can be logged or asserted on.

pub mod chart;
pub mod generation;
pub mod list;
pub mod modal;
pub mod system;

use serde::{Deserialize, Serialize};

pub use self::{
    chart::ChartState, generation::GenerationState, list::ListState, modal::ModalState,
    system::SystemState,
};
use crate::infrastructure::config::Config;

/// Lifecycle of one data concern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Unified application state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    pub list: ListState,
    pub chart: ChartState,
    pub generation: GenerationState,
    pub modal: ModalState,
    pub system: SystemState,
    #[serde(skip)]
    pub config: ConfigState,
}

/// Configuration state - holds all user-configurable settings
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    /// Current configuration loaded from file
    pub config: Config,
}

impl AppState {
    /// Initialize AppState from the loaded configuration
    pub fn new_with_config(config: Config) -> Self {
        let dashboard = &config.dashboard;
        Self {
            list: ListState::new(dashboard.page_size, dashboard.page_size_options.clone()),
            chart: ChartState::new(dashboard.chart_len, dashboard.chart_order),
            config: ConfigState {
                config: config.clone(),
            },
            ..Default::default()
        }
    }

    /// Whether any request is outstanding
    pub fn is_busy(&self) -> bool {
        self.list.is_loading() || self.chart.is_loading() || self.generation.is_generating()
    }
}
