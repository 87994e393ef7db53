use std::collections::VecDeque;
use tokio::sync::mpsc;

use crate::core::{
    cmd::{ApiCommand, Cmd, TuiCommand},
    cmd_executor::CmdExecutor,
    msg::Msg,
    raw_msg::RawMsg,
    state::AppState,
    translator::translate_raw_to_domain,
    update::update,
};

/// Owns the dashboard state and drives it through translate -> update -> execute
pub struct Runtime {
    state: AppState,
    msg_queue: VecDeque<Msg>,
    raw_msg_queue: VecDeque<RawMsg>,
    cmd_queue: VecDeque<Cmd>,
    raw_msg_tx: mpsc::UnboundedSender<RawMsg>,
    raw_msg_rx: mpsc::UnboundedReceiver<RawMsg>,
    cmd_executor: Option<CmdExecutor>,
    processed_messages: u64,
}

impl Runtime {
    /// Create a new Runtime without a command executor
    pub fn new(initial_state: AppState) -> Self {
        let (raw_msg_tx, raw_msg_rx) = mpsc::unbounded_channel();

        Self {
            state: initial_state,
            msg_queue: VecDeque::new(),
            raw_msg_queue: VecDeque::new(),
            cmd_queue: VecDeque::new(),
            raw_msg_tx,
            raw_msg_rx,
            cmd_executor: None,
            processed_messages: 0,
        }
    }

    /// Create a new Runtime with a command executor that has no services attached
    pub fn new_with_executor(initial_state: AppState) -> Self {
        let mut runtime = Self::new(initial_state);
        let mut executor = CmdExecutor::new();
        executor.set_response_sender(runtime.raw_msg_tx.clone());
        runtime.cmd_executor = Some(executor);
        runtime
    }

    /// Create a new Runtime forwarding API commands to ApiService
    pub fn new_with_api_executor(
        initial_state: AppState,
        api_sender: mpsc::UnboundedSender<ApiCommand>,
    ) -> Self {
        let mut runtime = Self::new(initial_state);
        let mut executor = CmdExecutor::new_with_api(api_sender);
        executor.set_response_sender(runtime.raw_msg_tx.clone());
        runtime.cmd_executor = Some(executor);
        runtime
    }

    /// Add ApiCommand support to the existing executor
    pub fn add_api_support(
        &mut self,
        api_sender: mpsc::UnboundedSender<ApiCommand>,
    ) -> Result<(), String> {
        if let Some(executor) = &mut self.cmd_executor {
            executor.set_api_sender(api_sender);
            Ok(())
        } else {
            Err("No executor available. Use new_with_executor() first.".to_string())
        }
    }

    /// Add TUI command sender support to existing executor (for TuiCommand execution)
    pub fn add_tui_sender(
        &mut self,
        tui_sender: mpsc::UnboundedSender<TuiCommand>,
    ) -> Result<(), String> {
        if let Some(executor) = &mut self.cmd_executor {
            executor.set_tui_sender(tui_sender);
            Ok(())
        } else {
            Err("No executor available. Use new_with_executor() first.".to_string())
        }
    }

    /// Get raw message sender, handed to background services
    pub fn get_raw_sender(&self) -> mpsc::UnboundedSender<RawMsg> {
        self.raw_msg_tx.clone()
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of domain messages applied so far; the runner compares it
    /// across cycles to decide whether a redraw is needed
    pub fn processed_messages(&self) -> u64 {
        self.processed_messages
    }

    /// Send message directly (for testing)
    pub fn send_msg(&mut self, msg: Msg) {
        self.msg_queue.push_back(msg);
    }

    /// Send raw message (for integration with external systems)
    pub fn send_raw_msg(&mut self, raw_msg: RawMsg) {
        self.raw_msg_queue.push_back(raw_msg);
    }

    /// Get pending commands
    pub fn pending_commands(&mut self) -> Vec<Cmd> {
        self.cmd_queue.drain(..).collect()
    }

    /// Execute all pending commands using the command executor
    pub fn execute_pending_commands(&mut self) -> Result<Vec<String>, String> {
        let commands = self.pending_commands();
        let Some(executor) = self.cmd_executor.as_ref() else {
            return Err("No command executor available. Use new_with_executor() to configure."
                .to_string());
        };
        if commands.is_empty() {
            return Ok(vec![]);
        }

        executor
            .execute_commands(&commands)
            .map_err(|e| format!("Command execution failed: {e}"))
    }

    /// Process a single message
    pub fn process_message(&mut self, msg: Msg) -> Vec<Cmd> {
        if !msg.is_frequent() {
            log::debug!("Processing {msg:?}");
        }
        let state = std::mem::take(&mut self.state);
        let (new_state, commands) = update(msg, state);
        self.state = new_state;
        self.processed_messages += 1;

        self.cmd_queue.extend(commands.iter().cloned());
        commands
    }

    /// Process all messages in queue
    pub fn process_all_messages(&mut self) -> Vec<Cmd> {
        let mut all_commands = Vec::new();

        // Messages queued directly first, then raw messages from the runner and
        // from background services. Each raw message is translated against the
        // state left by everything before it.
        all_commands.extend(self.drain_msg_queue());
        while let Some(raw_msg) = self.raw_msg_queue.pop_front() {
            all_commands.extend(self.process_raw_message(raw_msg));
        }
        while let Ok(raw_msg) = self.raw_msg_rx.try_recv() {
            all_commands.extend(self.process_raw_message(raw_msg));
        }

        all_commands
    }

    fn process_raw_message(&mut self, raw_msg: RawMsg) -> Vec<Cmd> {
        let domain_msgs = translate_raw_to_domain(raw_msg, &self.state);
        self.msg_queue.extend(domain_msgs);
        self.drain_msg_queue()
    }

    fn drain_msg_queue(&mut self) -> Vec<Cmd> {
        let mut commands = Vec::new();
        while let Some(msg) = self.msg_queue.pop_front() {
            commands.extend(self.process_message(msg));
        }
        commands
    }

    /// Process all messages and execute commands in one step
    pub fn run_update_cycle(&mut self) -> Result<Vec<String>, String> {
        let _commands = self.process_all_messages();
        self.execute_pending_commands()
    }

    /// Get runtime statistics
    pub fn get_stats(&self) -> RuntimeStats {
        let has_api_support = self
            .cmd_executor
            .as_ref()
            .map(CmdExecutor::has_api_sender)
            .unwrap_or(false);

        RuntimeStats {
            queued_messages: self.msg_queue.len() + self.raw_msg_queue.len(),
            queued_commands: self.cmd_queue.len(),
            rows_on_page: self.state.list.page().items.len(),
            total_count: self.state.list.page().total_count,
            chart_points: self.state.chart.series().len(),
            is_modal_open: self.state.modal.open,
            is_busy: self.state.is_busy(),
            has_executor: self.cmd_executor.is_some(),
            has_api_support,
        }
    }
}

/// Runtime statistics
#[derive(Debug, Clone)]
pub struct RuntimeStats {
    pub queued_messages: usize,
    pub queued_commands: usize,
    pub rows_on_page: usize,
    pub total_count: usize,
    pub chart_points: usize,
    pub is_modal_open: bool,
    pub is_busy: bool,
    pub has_executor: bool,
    pub has_api_support: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    use crate::{
        core::{
            msg::{generation::GenerationMsg, list::ListMsg, system::SystemMsg},
            state::{ConfigState, LoadStatus},
        },
        domain::number::{GenerateResponse, GeneratedNumber, ListResponse},
        infrastructure::config::Config,
        presentation::config::keybindings::{parse_key_sequence, Action, KeyBindings},
    };

    fn create_test_runtime() -> Runtime {
        Runtime::new(AppState::default())
    }

    fn create_api_runtime() -> (Runtime, mpsc::UnboundedReceiver<ApiCommand>) {
        let (api_tx, api_rx) = mpsc::unbounded_channel();
        (
            Runtime::new_with_api_executor(AppState::default(), api_tx),
            api_rx,
        )
    }

    fn list_response(count: u64) -> ListResponse {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ListResponse {
            results: (0..count.min(10))
                .map(|i| GeneratedNumber::new(count - i, (i * 7) as i64, at))
                .collect(),
            count,
        }
    }

    #[test]
    fn test_runtime_creation() {
        let runtime = create_test_runtime();
        let stats = runtime.get_stats();

        assert_eq!(stats.queued_messages, 0);
        assert_eq!(stats.queued_commands, 0);
        assert_eq!(stats.rows_on_page, 0);
        assert!(!stats.is_modal_open);
        assert!(!stats.has_executor);
        assert_eq!(runtime.processed_messages(), 0);
    }

    #[test]
    fn test_send_and_process_message() {
        let mut runtime = create_test_runtime();
        runtime.send_msg(Msg::System(SystemMsg::Quit));
        assert_eq!(runtime.get_stats().queued_messages, 1);

        let commands = runtime.process_all_messages();
        assert!(commands.is_empty());
        assert!(runtime.state().system.should_quit);
        assert_eq!(runtime.processed_messages(), 1);
    }

    #[test]
    fn test_refresh_queues_fetch_commands() {
        let mut runtime = create_test_runtime();
        runtime.send_msg(Msg::Refresh);

        let commands = runtime.process_all_messages();
        assert_eq!(commands.len(), 2);
        assert_eq!(runtime.get_stats().queued_commands, 2);
        assert!(runtime.get_stats().is_busy);

        let pending = runtime.pending_commands();
        assert_eq!(pending, vec![Cmd::fetch_list(1, 10, 0), Cmd::fetch_chart(1, 20)]);
        assert_eq!(runtime.get_stats().queued_commands, 0);
    }

    #[test]
    fn test_raw_key_goes_through_translator() {
        let bindings = [("<g>", Action::Generate)]
            .into_iter()
            .map(|(keys, action)| (parse_key_sequence(keys).unwrap(), action))
            .collect();
        let state = AppState {
            config: ConfigState {
                config: Config {
                    keybindings: KeyBindings(bindings),
                    ..Default::default()
                },
            },
            ..Default::default()
        };
        let mut runtime = Runtime::new(state);

        runtime.send_raw_msg(RawMsg::Key(KeyEvent::new(
            KeyCode::Char('g'),
            KeyModifiers::NONE,
        )));
        let commands = runtime.process_all_messages();

        assert_eq!(commands, vec![Cmd::generate(1)]);
        assert!(runtime.state().generation.is_generating());
    }

    #[test]
    fn test_raw_sender_delivers_service_responses() {
        let mut runtime = create_test_runtime();
        runtime.send_msg(Msg::List(ListMsg::Load));
        runtime.process_all_messages();

        let raw_tx = runtime.get_raw_sender();
        raw_tx
            .send(RawMsg::ListFetched {
                seq: 1,
                result: Ok(list_response(4)),
            })
            .unwrap();
        runtime.process_all_messages();

        let stats = runtime.get_stats();
        assert_eq!(stats.rows_on_page, 4);
        assert_eq!(stats.total_count, 4);
        assert!(!stats.is_busy);
    }

    #[test]
    fn test_run_update_cycle_forwards_api_commands() {
        let (mut runtime, mut api_rx) = create_api_runtime();
        assert!(runtime.get_stats().has_api_support);

        runtime.send_msg(Msg::Generation(GenerationMsg::Generate));
        let log = runtime.run_update_cycle().unwrap();

        assert_eq!(log.len(), 1);
        assert!(log[0].contains("✓ Executed: Api(Generate)"));
        assert_eq!(api_rx.try_recv().unwrap(), ApiCommand::Generate { seq: 1 });
    }

    #[test]
    fn test_generated_number_round_trip() {
        let (mut runtime, mut api_rx) = create_api_runtime();
        runtime.send_msg(Msg::Generation(GenerationMsg::Generate));
        runtime.run_update_cycle().unwrap();
        let ApiCommand::Generate { seq } = api_rx.try_recv().unwrap() else {
            panic!("expected generate command");
        };

        runtime
            .get_raw_sender()
            .send(RawMsg::NumberGenerated {
                seq,
                result: Ok(GenerateResponse { value: 42 }),
            })
            .unwrap();
        runtime.run_update_cycle().unwrap();

        assert!(runtime.get_stats().is_modal_open);
        assert_eq!(runtime.state().modal.value, Some(42));
        assert!(matches!(
            api_rx.try_recv().unwrap(),
            ApiCommand::FetchList { .. }
        ));
        assert!(matches!(
            api_rx.try_recv().unwrap(),
            ApiCommand::FetchChart { .. }
        ));
    }

    #[test]
    fn test_execute_pending_commands_empty() {
        let mut runtime = Runtime::new_with_executor(AppState::default());
        let result = runtime.execute_pending_commands();
        assert_eq!(result, Ok(vec![]));
    }

    #[test]
    fn test_execute_pending_commands_without_executor() {
        let mut runtime = create_test_runtime();
        runtime.send_msg(Msg::Refresh);
        runtime.process_all_messages();

        let result = runtime.execute_pending_commands();
        assert!(result
            .unwrap_err()
            .contains("No command executor available"));
        assert_eq!(runtime.get_stats().queued_commands, 0);
    }

    #[test]
    fn test_undeliverable_requests_settle_with_errors() {
        let (mut runtime, api_rx) = create_api_runtime();
        drop(api_rx);

        runtime.send_msg(Msg::Refresh);
        runtime.send_msg(Msg::Generation(GenerationMsg::Generate));
        let log = runtime.run_update_cycle().unwrap();
        assert_eq!(log.len(), 3);
        assert!(log.iter().all(|entry| entry.starts_with("✗ Failed to execute")));

        // The error responses arrive on the next cycle
        runtime.run_update_cycle().unwrap();

        let state = runtime.state();
        assert!(!state.is_busy());
        assert_eq!(state.list.status(), LoadStatus::Error);
        assert_eq!(state.chart.status(), LoadStatus::Error);
        assert_eq!(state.generation.status, LoadStatus::Error);
        assert!(state
            .system
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("[ERR: ")));

        // A new attempt is issued instead of being swallowed as "in flight"
        runtime.send_msg(Msg::Generation(GenerationMsg::Generate));
        let log = runtime.run_update_cycle().unwrap();
        assert_eq!(log.len(), 1);
        assert!(log[0].starts_with("✗ Failed to execute Api(Generate)"));
        runtime.run_update_cycle().unwrap();
        assert!(!runtime.state().generation.is_generating());
    }

    #[test]
    fn test_requests_without_api_service_settle_with_errors() {
        let mut runtime = Runtime::new_with_executor(AppState::default());

        runtime.send_msg(Msg::Refresh);
        runtime.run_update_cycle().unwrap();
        runtime.run_update_cycle().unwrap();

        assert!(!runtime.get_stats().is_busy);
        assert_eq!(runtime.state().list.status(), LoadStatus::Error);
        assert_eq!(runtime.state().chart.status(), LoadStatus::Error);
    }

    #[test]
    fn test_key_after_generated_number_in_same_cycle_is_captured_by_modal() {
        let bindings = [("<g>", Action::Generate), ("<l>", Action::NextPage)]
            .into_iter()
            .map(|(keys, action)| (parse_key_sequence(keys).unwrap(), action))
            .collect();
        let state = AppState {
            config: ConfigState {
                config: Config {
                    keybindings: KeyBindings(bindings),
                    ..Default::default()
                },
            },
            ..Default::default()
        };
        let (api_tx, mut api_rx) = mpsc::unbounded_channel();
        let mut runtime = Runtime::new_with_api_executor(state, api_tx);

        runtime.send_msg(Msg::Refresh);
        runtime.run_update_cycle().unwrap();
        while api_rx.try_recv().is_ok() {}
        runtime.send_raw_msg(RawMsg::ListFetched {
            seq: 1,
            result: Ok(list_response(40)),
        });
        runtime.send_raw_msg(RawMsg::ChartFetched {
            seq: 1,
            result: Ok(list_response(40)),
        });
        runtime.send_msg(Msg::Generation(GenerationMsg::Generate));
        runtime.run_update_cycle().unwrap();
        while api_rx.try_recv().is_ok() {}

        // The number and two key presses land in the same cycle
        runtime
            .get_raw_sender()
            .send(RawMsg::NumberGenerated {
                seq: 1,
                result: Ok(GenerateResponse { value: 42 }),
            })
            .unwrap();
        runtime
            .get_raw_sender()
            .send(RawMsg::Key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE)))
            .unwrap();
        runtime
            .get_raw_sender()
            .send(RawMsg::Key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE)))
            .unwrap();
        runtime.run_update_cycle().unwrap();

        let state = runtime.state();
        assert!(state.modal.open);
        assert_eq!(state.list.page().cursor.index, 0);
        assert!(!state.generation.is_generating());
        // Only the reload triggered by the new number goes out
        assert_eq!(api_rx.try_recv().unwrap(), ApiCommand::FetchList { seq: 2, limit: 10, offset: 0 });
        assert_eq!(api_rx.try_recv().unwrap(), ApiCommand::FetchChart { seq: 2, limit: 20 });
        assert!(api_rx.try_recv().is_err());
    }

    #[test]
    fn test_add_senders_without_executor() {
        let mut runtime = create_test_runtime();
        let (api_tx, _api_rx) = mpsc::unbounded_channel();
        let (tui_tx, _tui_rx) = mpsc::unbounded_channel();

        assert!(runtime.add_api_support(api_tx).is_err());
        assert!(runtime.add_tui_sender(tui_tx).is_err());
    }

    #[test]
    fn test_resize_is_forwarded_to_tui_sender() {
        let mut runtime = Runtime::new_with_executor(AppState::default());
        let (tui_tx, mut tui_rx) = mpsc::unbounded_channel();
        runtime.add_tui_sender(tui_tx).unwrap();

        runtime.send_raw_msg(RawMsg::Resize(120, 40));
        runtime.run_update_cycle().unwrap();

        assert_eq!(
            tui_rx.try_recv().unwrap(),
            TuiCommand::Resize {
                width: 120,
                height: 40
            }
        );
    }
}
