use serde::{Deserialize, Serialize};

use crate::{
    domain::{number::ListResponse, request::RequestSeq},
    infrastructure::api::FetchError,
};

/// Messages for the paginated table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListMsg {
    /// (Re)load the page the cursor points at
    Load,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    IncreasePageSize,
    DecreasePageSize,
    SetPageSize(usize),
    /// Response to the list request tagged `seq`
    Fetched {
        seq: RequestSeq,
        result: Result<ListResponse, FetchError>,
    },
}
