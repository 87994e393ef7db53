use serde::{Deserialize, Serialize};

/// Messages for the generated-number modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalMsg {
    Open(i64),
    Close,
}
