use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        number::{GenerateResponse, ListResponse},
        request::RequestSeq,
    },
    infrastructure::api::FetchError,
};

/// Raw messages from external sources (input, network, system)
/// These represent unprocessed external events that need to be translated to domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawMsg {
    // System events
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Suspend,
    Resume,

    // User input (raw keyboard events)
    Key(KeyEvent),

    // API responses, tagged with the sequence number of the request
    ListFetched {
        seq: RequestSeq,
        result: Result<ListResponse, FetchError>,
    },
    ChartFetched {
        seq: RequestSeq,
        result: Result<ListResponse, FetchError>,
    },
    NumberGenerated {
        seq: RequestSeq,
        result: Result<GenerateResponse, FetchError>,
    },

    // Failures outside any single request
    Error(String),
}

impl RawMsg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(self, RawMsg::Tick | RawMsg::Render)
    }
}
