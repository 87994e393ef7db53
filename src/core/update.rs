use crate::core::{
    cmd::Cmd,
    msg::{
        chart::ChartMsg, generation::GenerationMsg, list::ListMsg, modal::ModalMsg,
        system::SystemMsg, Msg,
    },
    state::AppState,
};

/// Elm-like update function
/// Returns new state and list of commands from current state and message
///
/// Each concern updates its own sub-state. Interactions between concerns
/// (a generated number opening the modal and refreshing the data, failures
/// surfacing on the status line) are wired here.
pub fn update(msg: Msg, mut state: AppState) -> (AppState, Vec<Cmd>) {
    match msg {
        // System messages (delegated to SystemState)
        Msg::System(system_msg) => {
            let commands = state.system.update(system_msg);
            (state, commands)
        }

        Msg::Modal(modal_msg) => {
            let commands = state.modal.update(modal_msg);
            (state, commands)
        }

        Msg::Refresh => {
            let mut commands = state.list.update(ListMsg::Load);
            commands.extend(state.chart.update(ChartMsg::Load));
            (state, commands)
        }

        Msg::List(ListMsg::Fetched { seq, result }) => {
            let outcome = state
                .list
                .is_current(seq)
                .then(|| result.as_ref().err().map(ToString::to_string));
            let mut commands = state.list.update(ListMsg::Fetched { seq, result });
            match outcome {
                Some(Some(message)) => {
                    commands.extend(state.system.update(SystemMsg::ShowError {
                        label: "List".to_string(),
                        message,
                    }));
                }
                Some(None) => commands.extend(clear_error(&mut state, "List")),
                None => {}
            }
            (state, commands)
        }

        // Table navigation (delegated to ListState)
        Msg::List(list_msg) => {
            let commands = state.list.update(list_msg);
            (state, commands)
        }

        Msg::Chart(ChartMsg::Fetched { seq, result }) => {
            let outcome = state
                .chart
                .is_current(seq)
                .then(|| result.as_ref().err().map(ToString::to_string));
            let mut commands = state.chart.update(ChartMsg::Fetched { seq, result });
            match outcome {
                Some(Some(message)) => {
                    commands.extend(state.system.update(SystemMsg::ShowError {
                        label: "Chart".to_string(),
                        message,
                    }));
                }
                Some(None) => commands.extend(clear_error(&mut state, "Chart")),
                None => {}
            }
            (state, commands)
        }

        Msg::Chart(chart_msg) => {
            let commands = state.chart.update(chart_msg);
            (state, commands)
        }

        Msg::Generation(GenerationMsg::Finished { seq, result }) => {
            let current = state.generation.is_current(seq);
            let outcome = result
                .as_ref()
                .map(|response| response.value)
                .map_err(ToString::to_string);
            let mut commands = state
                .generation
                .update(GenerationMsg::Finished { seq, result });

            if current {
                match outcome {
                    Ok(value) => {
                        commands.extend(state.modal.update(ModalMsg::Open(value)));
                        commands.extend(state.system.update(SystemMsg::UpdateStatusMessage {
                            label: "Generated".to_string(),
                            message: value.to_string(),
                        }));
                        // The new record shifts every page and the chart window
                        commands.extend(state.list.update(ListMsg::Load));
                        commands.extend(state.chart.update(ChartMsg::Load));
                    }
                    Err(message) => {
                        commands.extend(state.system.update(SystemMsg::ShowError {
                            label: "Generate".to_string(),
                            message,
                        }));
                    }
                }
            }
            (state, commands)
        }

        Msg::Generation(generation_msg) => {
            let commands = state.generation.update(generation_msg);
            (state, commands)
        }
    }
}

/// Drop an error a previous attempt left on the status line once the same
/// concern loads successfully
fn clear_error(state: &mut AppState, label: &str) -> Vec<Cmd> {
    let prefix = format!("[ERR: {label}]");
    let stale = state
        .system
        .status_message
        .as_deref()
        .is_some_and(|message| message.starts_with(&prefix));
    if stale {
        state.system.update(SystemMsg::ClearStatusMessage)
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use crate::{
        core::state::LoadStatus,
        domain::number::{GenerateResponse, GeneratedNumber, ListResponse},
        infrastructure::api::FetchError,
    };

    fn list_response(count: u64) -> ListResponse {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        ListResponse {
            results: (0..count.min(10))
                .map(|i| GeneratedNumber::new(count - i, i as i64, at))
                .collect(),
            count,
        }
    }

    fn status_error() -> FetchError {
        FetchError::Status {
            url: "http://test/api".to_string(),
            status: 503,
        }
    }

    #[test]
    fn test_refresh_loads_list_and_chart() {
        let (state, cmds) = update(Msg::Refresh, AppState::default());

        assert_eq!(cmds, vec![Cmd::fetch_list(1, 10, 0), Cmd::fetch_chart(1, 20)]);
        assert!(state.list.is_loading());
        assert!(state.chart.is_loading());
    }

    #[test]
    fn test_generated_number_opens_modal_and_refreshes() {
        let (state, cmds) = update(
            Msg::Generation(GenerationMsg::Generate),
            AppState::default(),
        );
        assert_eq!(cmds, vec![Cmd::generate(1)]);

        let (state, cmds) = update(
            Msg::Generation(GenerationMsg::Finished {
                seq: 1,
                result: Ok(GenerateResponse { value: 73 }),
            }),
            state,
        );

        assert!(state.modal.open);
        assert_eq!(state.modal.value, Some(73));
        assert_eq!(state.system.status_message.as_deref(), Some("[Generated] 73"));
        assert!(cmds.contains(&Cmd::fetch_list(1, 10, 0)));
        assert!(cmds.contains(&Cmd::fetch_chart(1, 20)));
    }

    #[test]
    fn test_generate_failure_leaves_dashboard_untouched() {
        let (state, _) = update(Msg::Refresh, AppState::default());
        let (state, _) = update(
            Msg::List(ListMsg::Fetched {
                seq: 1,
                result: Ok(list_response(12)),
            }),
            state,
        );
        let (state, _) = update(Msg::Generation(GenerationMsg::Generate), state);
        let before_page = state.list.page().clone();

        let (state, cmds) = update(
            Msg::Generation(GenerationMsg::Finished {
                seq: 1,
                result: Err(status_error()),
            }),
            state,
        );

        assert!(!state.modal.open);
        assert_eq!(state.list.page(), &before_page);
        assert_eq!(state.generation.status, LoadStatus::Error);
        assert!(cmds.iter().all(|c| !matches!(c, Cmd::Api(_))));
        assert_eq!(
            state.system.status_message.as_deref(),
            Some("[ERR: Generate] http://test/api responded with HTTP 503")
        );
    }

    #[test]
    fn test_stale_generate_response_does_not_open_modal() {
        let mut state = AppState::default();
        state.generation.update(GenerationMsg::Generate);

        let (state, cmds) = update(
            Msg::Generation(GenerationMsg::Finished {
                seq: 99,
                result: Ok(GenerateResponse { value: 5 }),
            }),
            state,
        );
        assert!(cmds.is_empty());
        assert!(!state.modal.open);
        assert!(state.generation.is_generating());
    }

    #[test]
    fn test_list_failure_shows_error_status() {
        let (state, _) = update(Msg::List(ListMsg::Load), AppState::default());
        let (state, cmds) = update(
            Msg::List(ListMsg::Fetched {
                seq: 1,
                result: Err(status_error()),
            }),
            state,
        );

        assert_eq!(cmds.len(), 1);
        assert_eq!(state.list.status(), LoadStatus::Error);
        assert!(state
            .system
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("[ERR: List]")));
    }

    #[test]
    fn test_stale_list_failure_is_silent() {
        let (state, _) = update(Msg::List(ListMsg::Load), AppState::default());
        let (state, _) = update(Msg::List(ListMsg::Load), state);
        let (state, cmds) = update(
            Msg::List(ListMsg::Fetched {
                seq: 1,
                result: Err(status_error()),
            }),
            state,
        );

        assert!(cmds.is_empty());
        assert!(state.system.status_message.is_none());
        assert_eq!(state.list.status(), LoadStatus::Loading);
    }

    #[test]
    fn test_chart_failure_keeps_list() {
        let (state, _) = update(Msg::Refresh, AppState::default());
        let (state, _) = update(
            Msg::List(ListMsg::Fetched {
                seq: 1,
                result: Ok(list_response(3)),
            }),
            state,
        );
        let (state, _) = update(
            Msg::Chart(ChartMsg::Fetched {
                seq: 1,
                result: Err(status_error()),
            }),
            state,
        );

        assert_eq!(state.list.page().items.len(), 3);
        assert_eq!(state.chart.status(), LoadStatus::Error);
        assert!(state.chart.is_empty());
    }

    #[test]
    fn test_successful_reload_clears_list_error() {
        let (state, _) = update(Msg::List(ListMsg::Load), AppState::default());
        let (state, _) = update(
            Msg::List(ListMsg::Fetched {
                seq: 1,
                result: Err(status_error()),
            }),
            state,
        );
        assert!(state.system.status_message.is_some());

        let (state, _) = update(Msg::List(ListMsg::Load), state);
        let (state, _) = update(
            Msg::List(ListMsg::Fetched {
                seq: 2,
                result: Ok(list_response(3)),
            }),
            state,
        );

        assert_eq!(state.list.status(), LoadStatus::Loaded);
        assert!(state.system.status_message.is_none());
    }

    #[test]
    fn test_successful_reload_keeps_other_messages() {
        let (state, _) = update(Msg::Refresh, AppState::default());
        let (state, _) = update(
            Msg::Chart(ChartMsg::Fetched {
                seq: 1,
                result: Err(status_error()),
            }),
            state,
        );
        // A list success does not clear the chart's error
        let (state, _) = update(
            Msg::List(ListMsg::Fetched {
                seq: 1,
                result: Ok(list_response(3)),
            }),
            state,
        );
        assert!(state
            .system
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("[ERR: Chart]")));

        let (state, _) = update(Msg::Chart(ChartMsg::Load), state);
        let (state, _) = update(
            Msg::Chart(ChartMsg::Fetched {
                seq: 2,
                result: Ok(list_response(3)),
            }),
            state,
        );
        assert!(state.system.status_message.is_none());
    }

    #[test]
    fn test_successful_reload_keeps_generated_status() {
        let (state, _) = update(Msg::Generation(GenerationMsg::Generate), AppState::default());
        let (state, _) = update(
            Msg::Generation(GenerationMsg::Finished {
                seq: 1,
                result: Ok(GenerateResponse { value: 8 }),
            }),
            state,
        );
        let (state, _) = update(
            Msg::List(ListMsg::Fetched {
                seq: 1,
                result: Ok(list_response(1)),
            }),
            state,
        );
        assert_eq!(state.system.status_message.as_deref(), Some("[Generated] 8"));
    }

    #[test]
    fn test_close_modal() {
        let mut state = AppState::default();
        state.modal.update(ModalMsg::Open(1));
        let (state, cmds) = update(Msg::Modal(ModalMsg::Close), state);
        assert!(!state.modal.open);
        assert!(cmds.is_empty());
    }
}
