use serde::{Deserialize, Serialize};

pub mod chart;
pub mod generation;
pub mod list;
pub mod modal;
pub mod system;

use chart::ChartMsg;
use generation::GenerationMsg;
use list::ListMsg;
use modal::ModalMsg;
use system::SystemMsg;

/// Domain messages representing application intent
/// These are processed by the update function and represent pure domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    // System operations (delegated to SystemState)
    System(SystemMsg),

    // Paginated table (delegated to ListState)
    List(ListMsg),

    // Recent-values chart (delegated to ChartState)
    Chart(ChartMsg),

    // Number generation (delegated to GenerationState)
    Generation(GenerationMsg),

    // Generated-number modal (delegated to ModalState)
    Modal(ModalMsg),

    /// Reload both the current page and the chart
    Refresh,
}

impl Msg {
    /// Helper to exclude frequent messages during debugging
    /// Domain messages are not frequent (raw messages handle Tick/Render)
    pub fn is_frequent(&self) -> bool {
        false
    }
}
