use serde::{Deserialize, Serialize};

use crate::{
    domain::{number::GenerateResponse, request::RequestSeq},
    infrastructure::api::FetchError,
};

/// Messages for generating a new number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationMsg {
    Generate,
    Finished {
        seq: RequestSeq,
        result: Result<GenerateResponse, FetchError>,
    },
}
