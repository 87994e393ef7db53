use serde::{Deserialize, Serialize};

use crate::{
    core::{cmd::Cmd, msg::generation::GenerationMsg, state::LoadStatus},
    domain::request::{RequestSeq, RequestTracker},
    infrastructure::api::FetchError,
};

/// State of the "generate a new number" action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationState {
    pub status: LoadStatus,
    pub last_value: Option<i64>,
    pub last_error: Option<FetchError>,
    tracker: RequestTracker,
}

impl GenerationState {
    pub fn is_generating(&self) -> bool {
        self.tracker.is_in_flight()
    }

    pub fn is_current(&self, seq: RequestSeq) -> bool {
        self.tracker.is_current(seq)
    }

    pub fn update(&mut self, msg: GenerationMsg) -> Vec<Cmd> {
        match msg {
            GenerationMsg::Generate => {
                // At most one generation in flight
                if self.is_generating() {
                    log::debug!("Generate ignored: a generation is already in flight");
                    return vec![];
                }
                let seq = self.tracker.begin();
                self.status = LoadStatus::Loading;
                vec![Cmd::generate(seq)]
            }

            GenerationMsg::Finished { seq, result } => {
                if !self.tracker.settle(seq) {
                    log::debug!("Discarding stale generate response #{seq}");
                    return vec![];
                }
                match result {
                    Ok(response) => {
                        self.status = LoadStatus::Loaded;
                        self.last_value = Some(response.value);
                        self.last_error = None;
                        vec![Cmd::LogInfo {
                            message: format!("Generated number {}", response.value),
                        }]
                    }
                    Err(err) => {
                        self.status = LoadStatus::Error;
                        let message = format!("Failed to generate a number: {err}");
                        self.last_error = Some(err);
                        vec![Cmd::LogError { message }]
                    }
                }
            }
        }
    }
}
