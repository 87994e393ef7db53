use serde::{Deserialize, Serialize};

use crate::{
    core::raw_msg::RawMsg,
    domain::request::RequestSeq,
    infrastructure::api::{FetchError, GENERATE_PATH, LIST_PATH},
};

/// UI (TUI) specific sub-commands executed by the host/runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuiCommand {
    Resize { width: u16, height: u16 },
}

/// Requests to the remote number API. Each carries the sequence number its response
/// must echo so superseded responses can be recognised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiCommand {
    FetchList {
        seq: RequestSeq,
        limit: usize,
        offset: usize,
    },
    FetchChart {
        seq: RequestSeq,
        limit: usize,
    },
    Generate {
        seq: RequestSeq,
    },
}

impl ApiCommand {
    /// Response standing in for a request that never reached ApiService, so the
    /// concern that issued it settles with an error instead of loading forever
    pub fn undelivered(&self, reason: &str) -> RawMsg {
        let error = |path: &str| FetchError::Transport {
            url: path.to_string(),
            message: reason.to_string(),
        };
        match *self {
            ApiCommand::FetchList { seq, .. } => RawMsg::ListFetched {
                seq,
                result: Err(error(LIST_PATH)),
            },
            ApiCommand::FetchChart { seq, .. } => RawMsg::ChartFetched {
                seq,
                result: Err(error(LIST_PATH)),
            },
            ApiCommand::Generate { seq } => RawMsg::NumberGenerated {
                seq,
                result: Err(error(GENERATE_PATH)),
            },
        }
    }
}

/// Elm-like command definitions
/// Represents side effects (network communication, terminal control, logging)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    Api(ApiCommand),

    Tui(TuiCommand),

    LogError { message: String },
    LogInfo { message: String },
}

impl Cmd {
    pub fn fetch_list(seq: RequestSeq, limit: usize, offset: usize) -> Self {
        Cmd::Api(ApiCommand::FetchList { seq, limit, offset })
    }

    pub fn fetch_chart(seq: RequestSeq, limit: usize) -> Self {
        Cmd::Api(ApiCommand::FetchChart { seq, limit })
    }

    pub fn generate(seq: RequestSeq) -> Self {
        Cmd::Api(ApiCommand::Generate { seq })
    }

    /// Human-readable command name for execution logs
    pub fn name(&self) -> &'static str {
        match self {
            Cmd::Api(ApiCommand::FetchList { .. }) => "Api(FetchList)",
            Cmd::Api(ApiCommand::FetchChart { .. }) => "Api(FetchChart)",
            Cmd::Api(ApiCommand::Generate { .. }) => "Api(Generate)",
            Cmd::Tui(TuiCommand::Resize { .. }) => "Tui(Resize)",
            Cmd::LogError { .. } => "LogError",
            Cmd::LogInfo { .. } => "LogInfo",
        }
    }
}
