use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::core::{
    cmd::{ApiCommand, Cmd, TuiCommand},
    raw_msg::RawMsg,
};

/// Command executor that routes Elm commands to the services performing them
#[derive(Clone, Default)]
pub struct CmdExecutor {
    api_sender: Option<mpsc::UnboundedSender<ApiCommand>>,
    tui_sender: Option<mpsc::UnboundedSender<TuiCommand>>,
    // Where responses for requests that could not be dispatched are reported
    response_sender: Option<mpsc::UnboundedSender<RawMsg>>,
}

impl CmdExecutor {
    /// Create a new command executor without any service attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new command executor forwarding API requests to ApiService
    pub fn new_with_api(api_sender: mpsc::UnboundedSender<ApiCommand>) -> Self {
        Self {
            api_sender: Some(api_sender),
            ..Self::default()
        }
    }

    pub fn set_api_sender(&mut self, api_sender: mpsc::UnboundedSender<ApiCommand>) {
        self.api_sender = Some(api_sender);
    }

    /// Inject TUI command sender for executing TuiCommand asynchronously.
    pub fn set_tui_sender(&mut self, sender: mpsc::UnboundedSender<TuiCommand>) {
        self.tui_sender = Some(sender);
    }

    /// Inject the raw message sender that receives error responses for
    /// API requests which never reached ApiService
    pub fn set_response_sender(&mut self, sender: mpsc::UnboundedSender<RawMsg>) {
        self.response_sender = Some(sender);
    }

    pub fn has_api_sender(&self) -> bool {
        self.api_sender.is_some()
    }

    /// Execute a single command
    pub fn execute_command(&self, cmd: &Cmd) -> Result<()> {
        match cmd {
            Cmd::Api(api_cmd) => match &self.api_sender {
                Some(api_sender) => {
                    if let Err(e) = api_sender.send(api_cmd.clone()) {
                        self.report_undelivered(api_cmd, "ApiService is not running");
                        return Err(e.into());
                    }
                }
                None => {
                    log::warn!("{} failed: ApiService not available", cmd.name());
                    self.report_undelivered(api_cmd, "ApiService not available");
                }
            },

            Cmd::Tui(tui_cmd) => {
                if let Some(tx) = &self.tui_sender {
                    tx.send(tui_cmd.clone())?;
                } else {
                    log::warn!("CmdExecutor: TUI sender not configured; dropping {tui_cmd:?}");
                }
            }

            Cmd::LogError { message } => {
                log::error!("{message}");
            }

            Cmd::LogInfo { message } => {
                log::info!("{message}");
            }
        }

        Ok(())
    }

    /// Execute multiple commands
    pub fn execute_commands(&self, commands: &[Cmd]) -> Result<Vec<String>> {
        let mut execution_log = Vec::new();

        for cmd in commands {
            match self.execute_command(cmd) {
                Ok(()) => {
                    execution_log.push(format!("✓ Executed: {}", cmd.name()));
                }
                Err(e) => {
                    let error_msg = format!("✗ Failed to execute {}: {e}", cmd.name());
                    log::error!("{error_msg}");
                    execution_log.push(error_msg);
                }
            }
        }

        Ok(execution_log)
    }

    fn report_undelivered(&self, api_cmd: &ApiCommand, reason: &str) {
        let Some(tx) = &self.response_sender else {
            log::warn!("CmdExecutor: no response sender; {api_cmd:?} stays unanswered");
            return;
        };
        if tx.send(api_cmd.undelivered(reason)).is_err() {
            log::debug!("CmdExecutor: response receiver dropped");
        }
    }
}
