use serde::{Deserialize, Serialize};

use crate::{
    domain::{number::ListResponse, request::RequestSeq},
    infrastructure::api::FetchError,
};

/// Messages for the recent-values chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartMsg {
    Load,
    Fetched {
        seq: RequestSeq,
        result: Result<ListResponse, FetchError>,
    },
}
