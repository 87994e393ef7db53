use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    core::{
        msg::{
            chart::ChartMsg, generation::GenerationMsg, list::ListMsg, modal::ModalMsg,
            system::SystemMsg, Msg,
        },
        raw_msg::RawMsg,
        state::AppState,
    },
    presentation::config::keybindings::Action,
};

/// Translates raw external events into domain messages
/// This function is pure and contains no side effects
pub fn translate_raw_to_domain(raw: RawMsg, state: &AppState) -> Vec<Msg> {
    match raw {
        // System events - direct mapping
        RawMsg::Quit => vec![Msg::System(SystemMsg::Quit)],
        RawMsg::Suspend => vec![Msg::System(SystemMsg::Suspend)],
        RawMsg::Resume => vec![Msg::System(SystemMsg::Resume)],
        RawMsg::Resize(width, height) => vec![Msg::System(SystemMsg::Resize(width, height))],

        // User input - translate based on context and key bindings
        RawMsg::Key(key) => translate_key_event(key, state),

        // API responses - routed to the concern that issued the request
        RawMsg::ListFetched { seq, result } => vec![Msg::List(ListMsg::Fetched { seq, result })],
        RawMsg::ChartFetched { seq, result } => {
            vec![Msg::Chart(ChartMsg::Fetched { seq, result })]
        }
        RawMsg::NumberGenerated { seq, result } => {
            vec![Msg::Generation(GenerationMsg::Finished { seq, result })]
        }

        // System events
        RawMsg::Error(message) => vec![Msg::System(SystemMsg::ShowError {
            label: "System".to_string(),
            message,
        })],

        // Ignore frequent system events in domain layer
        RawMsg::Tick | RawMsg::Render => vec![],
    }
}

/// Terminals report shifted punctuation (`$`, `+`) with the SHIFT modifier set;
/// bindings are written without it
fn normalize_key(key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Char(c) => KeyEvent::new(KeyCode::Char(c), key.modifiers - KeyModifiers::SHIFT),
        code => KeyEvent::new(code, key.modifiers),
    }
}

/// Translates keyboard input to domain events based on current application state
fn translate_key_event(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }

    let key = normalize_key(key);
    let Some(action) = state.config.config.keybindings.action_for(&key) else {
        return vec![]; // No matching keybinding found
    };

    // While the modal is up only closing it (or quitting) does anything
    if state.modal.open {
        return match action {
            Action::CloseModal => vec![Msg::Modal(ModalMsg::Close)],
            Action::Quit => vec![Msg::System(SystemMsg::Quit)],
            _ => vec![],
        };
    }

    translate_action_to_msg(action)
}

fn translate_action_to_msg(action: Action) -> Vec<Msg> {
    match action {
        Action::Quit => vec![Msg::System(SystemMsg::Quit)],
        Action::Suspend => vec![Msg::System(SystemMsg::Suspend)],
        Action::Generate => vec![Msg::Generation(GenerationMsg::Generate)],
        Action::Refresh => vec![Msg::Refresh],
        Action::NextPage => vec![Msg::List(ListMsg::NextPage)],
        Action::PreviousPage => vec![Msg::List(ListMsg::PreviousPage)],
        Action::FirstPage => vec![Msg::List(ListMsg::FirstPage)],
        Action::LastPage => vec![Msg::List(ListMsg::LastPage)],
        Action::IncreasePageSize => vec![Msg::List(ListMsg::IncreasePageSize)],
        Action::DecreasePageSize => vec![Msg::List(ListMsg::DecreasePageSize)],
        // Nothing to close
        Action::CloseModal => vec![],
    }
}
