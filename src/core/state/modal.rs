use serde::{Deserialize, Serialize};

use crate::core::{cmd::Cmd, msg::modal::ModalMsg};

/// Dialog announcing a newly generated number. Only closed by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalState {
    pub open: bool,
    pub value: Option<i64>,
}

impl ModalState {
    pub fn update(&mut self, msg: ModalMsg) -> Vec<Cmd> {
        match msg {
            ModalMsg::Open(value) => {
                self.open = true;
                self.value = Some(value);
            }
            ModalMsg::Close => {
                self.open = false;
                self.value = None;
            }
        }
        vec![]
    }
}
