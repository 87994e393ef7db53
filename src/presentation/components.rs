//! Component collection and management
//!
//! Components are stateless renderers that receive state as parameters.

use ratatui::prelude::*;

use crate::core::state::AppState;

pub mod dashboard;

pub use dashboard::DashboardComponent;

/// Collection of all components
pub struct Components {
    pub dashboard: DashboardComponent,
}

impl Components {
    /// Create a new component collection
    pub fn new() -> Self {
        Self {
            dashboard: DashboardComponent::new(),
        }
    }

    /// Render all components
    ///
    /// This is the main rendering entry point that delegates to individual components.
    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.area();
        self.dashboard.view(state, frame, area);
    }
}

impl Default for Components {
    fn default() -> Self {
        Self::new()
    }
}
