use serde::{Deserialize, Serialize};

use crate::core::{
    cmd::{Cmd, TuiCommand},
    msg::system::SystemMsg,
};

/// System-related state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemState {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub status_message: Option<String>,
}

impl SystemState {
    /// System-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: SystemMsg) -> Vec<Cmd> {
        match msg {
            // System control
            SystemMsg::Quit => {
                self.should_quit = true;
                vec![]
            }

            SystemMsg::Suspend => {
                self.should_suspend = true;
                vec![]
            }

            SystemMsg::Resume => {
                self.should_suspend = false;
                vec![]
            }

            SystemMsg::Resize(width, height) => {
                vec![Cmd::Tui(TuiCommand::Resize { width, height })]
            }

            // Status management
            SystemMsg::UpdateStatusMessage { label, message } => {
                self.status_message = Some(format!("[{label}] {message}"));
                vec![]
            }

            SystemMsg::ShowError { label, message } => {
                self.status_message = Some(format!("[ERR: {label}] {message}"));
                vec![]
            }

            SystemMsg::ClearStatusMessage => {
                self.status_message = None;
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_state_quit_isolated() {
        let mut system = SystemState::default();
        assert!(!system.should_quit);

        let cmds = system.update(SystemMsg::Quit);

        assert!(system.should_quit);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_system_state_suspend_resume() {
        let mut system = SystemState::default();
        system.update(SystemMsg::Suspend);
        assert!(system.should_suspend);
        system.update(SystemMsg::Resume);
        assert!(!system.should_suspend);
    }

    #[test]
    fn test_system_state_status_message_isolated() {
        let mut system = SystemState::default();
        assert!(system.status_message.is_none());

        let cmds = system.update(SystemMsg::UpdateStatusMessage {
            label: "Generated".to_string(),
            message: "42".to_string(),
        });
        assert_eq!(system.status_message.as_deref(), Some("[Generated] 42"));
        assert!(cmds.is_empty());

        system.update(SystemMsg::ShowError {
            label: "List".to_string(),
            message: "HTTP 500".to_string(),
        });
        assert_eq!(system.status_message.as_deref(), Some("[ERR: List] HTTP 500"));

        system.update(SystemMsg::ClearStatusMessage);
        assert!(system.status_message.is_none());
    }

    #[test]
    fn test_system_state_resize_generates_command() {
        let mut system = SystemState::default();

        let cmds = system.update(SystemMsg::Resize(80, 24));

        assert_eq!(
            cmds,
            vec![Cmd::Tui(TuiCommand::Resize {
                width: 80,
                height: 24
            })]
        );
    }
}
