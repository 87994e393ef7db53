//! End-to-end dashboard scenarios driven through the runtime with an in-memory server

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use numdash::{
    core::{
        cmd::ApiCommand,
        msg::{generation::GenerationMsg, list::ListMsg, modal::ModalMsg},
        state::LoadStatus,
    },
    domain::number::{GenerateResponse, GeneratedNumber, ListResponse},
    infrastructure::{api::FetchError, config::Config},
    integration::runtime::Runtime,
    AppState, Msg, RawMsg,
};

/// Stores numbers newest first, like the real list endpoint returns them
struct FakeServer {
    numbers: Vec<GeneratedNumber>,
    next_value: i64,
    fail_generate: bool,
}

impl FakeServer {
    fn with_numbers(count: u64) -> Self {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let numbers = (1..=count)
            .rev()
            .map(|id| {
                GeneratedNumber::new(id, (id * 13 % 100) as i64, start + Duration::minutes(id as i64))
            })
            .collect();
        Self {
            numbers,
            next_value: 77,
            fail_generate: false,
        }
    }

    fn page(&self, limit: usize, offset: usize) -> ListResponse {
        ListResponse {
            results: self.numbers.iter().skip(offset).take(limit).cloned().collect(),
            count: self.numbers.len() as u64,
        }
    }

    fn answer(&mut self, cmd: ApiCommand) -> RawMsg {
        match cmd {
            ApiCommand::FetchList { seq, limit, offset } => RawMsg::ListFetched {
                seq,
                result: Ok(self.page(limit, offset)),
            },
            ApiCommand::FetchChart { seq, limit } => RawMsg::ChartFetched {
                seq,
                result: Ok(self.page(limit, 0)),
            },
            ApiCommand::Generate { seq } => {
                if self.fail_generate {
                    return RawMsg::NumberGenerated {
                        seq,
                        result: Err(FetchError::Status {
                            url: "http://fake/generate/".to_string(),
                            status: 503,
                        }),
                    };
                }
                let id = self.numbers.first().map(|n| n.id + 1).unwrap_or(1);
                let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
                self.numbers
                    .insert(0, GeneratedNumber::new(id, self.next_value, created_at));
                RawMsg::NumberGenerated {
                    seq,
                    result: Ok(GenerateResponse {
                        value: self.next_value,
                    }),
                }
            }
        }
    }
}

struct Harness {
    runtime: Runtime,
    api_rx: mpsc::UnboundedReceiver<ApiCommand>,
    server: FakeServer,
}

impl Harness {
    fn new(server: FakeServer) -> Self {
        let (api_tx, api_rx) = mpsc::unbounded_channel();
        let state = AppState::new_with_config(Config::default());
        Self {
            runtime: Runtime::new_with_api_executor(state, api_tx),
            api_rx,
            server,
        }
    }

    /// Run update cycles, answering every request in order, until nothing is left in flight
    fn settle(&mut self) {
        loop {
            self.runtime.run_update_cycle().expect("update cycle");
            let mut answered = false;
            while let Ok(cmd) = self.api_rx.try_recv() {
                let raw = self.server.answer(cmd);
                self.runtime.send_raw_msg(raw);
                answered = true;
            }
            if !answered {
                break;
            }
        }
    }

    /// Collect outstanding requests without answering them
    fn take_requests(&mut self) -> Vec<ApiCommand> {
        self.runtime.run_update_cycle().expect("update cycle");
        let mut requests = vec![];
        while let Ok(cmd) = self.api_rx.try_recv() {
            requests.push(cmd);
        }
        requests
    }

    fn send(&mut self, msg: Msg) {
        self.runtime.send_msg(msg);
    }

    fn state(&self) -> &AppState {
        self.runtime.state()
    }
}

#[test]
fn test_initial_refresh_fills_table_and_chart() {
    let mut harness = Harness::new(FakeServer::with_numbers(25));
    harness.send(Msg::Refresh);
    harness.settle();

    let state = harness.state();
    assert_eq!(state.list.status(), LoadStatus::Loaded);
    assert_eq!(state.list.page().items.len(), 10);
    assert_eq!(state.list.page().total_count, 25);
    assert_eq!(state.list.page().items[0].id, 25);
    assert_eq!(state.list.page().range_label(), "1 – 10 of 25");

    assert_eq!(state.chart.status(), LoadStatus::Loaded);
    assert_eq!(state.chart.series().len(), 20);
    // oldest first: the newest record is plotted last and labelled #1
    assert_eq!(state.chart.series().labels.last().map(String::as_str), Some("#1"));
    assert_eq!(state.chart.series().latest(), Some((25 * 13 % 100) as i64));
    assert!(!state.is_busy());
}

#[test]
fn test_generate_opens_modal_and_refreshes_everything() {
    let mut harness = Harness::new(FakeServer::with_numbers(25));
    harness.send(Msg::Refresh);
    harness.settle();
    harness.send(Msg::List(ListMsg::NextPage));
    harness.settle();
    assert_eq!(harness.state().list.page().cursor.index, 1);

    harness.send(Msg::Generation(GenerationMsg::Generate));
    harness.settle();

    let state = harness.state();
    assert!(state.modal.open);
    assert_eq!(state.modal.value, Some(77));
    assert_eq!(state.system.status_message.as_deref(), Some("[Generated] 77"));
    // current page is reloaded against the new total
    assert_eq!(state.list.page().total_count, 26);
    assert_eq!(state.list.page().cursor.index, 1);
    assert_eq!(state.list.page().items[0].id, 16);
    assert_eq!(state.chart.series().latest(), Some(77));

    harness.send(Msg::Modal(ModalMsg::Close));
    harness.settle();
    assert!(!harness.state().modal.open);
    assert_eq!(harness.state().modal.value, None);
}

#[test]
fn test_generate_failure_keeps_dashboard() {
    let mut server = FakeServer::with_numbers(12);
    server.fail_generate = true;
    let mut harness = Harness::new(server);
    harness.send(Msg::Refresh);
    harness.settle();
    let page_before = harness.state().list.page().clone();
    let chart_before = harness.state().chart.series().clone();

    harness.send(Msg::Generation(GenerationMsg::Generate));
    harness.settle();

    let state = harness.state();
    assert!(!state.modal.open);
    assert_eq!(state.list.page(), &page_before);
    assert_eq!(state.chart.series(), &chart_before);
    assert_eq!(state.generation.status, LoadStatus::Error);
    assert!(state
        .system
        .status_message
        .as_deref()
        .is_some_and(|m| m.starts_with("[ERR: Generate]")));
}

#[test]
fn test_second_generate_while_in_flight_is_ignored() {
    let mut harness = Harness::new(FakeServer::with_numbers(3));
    harness.send(Msg::Generation(GenerationMsg::Generate));
    harness.send(Msg::Generation(GenerationMsg::Generate));

    let requests = harness.take_requests();
    assert_eq!(requests, vec![ApiCommand::Generate { seq: 1 }]);
}

#[test]
fn test_rapid_navigation_keeps_latest_page_only() {
    let mut harness = Harness::new(FakeServer::with_numbers(45));
    harness.send(Msg::Refresh);
    harness.settle();

    harness.send(Msg::List(ListMsg::NextPage));
    let first = harness.take_requests();
    harness.send(Msg::List(ListMsg::NextPage));
    let second = harness.take_requests();
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);

    // Responses arrive out of order: the newer one first, then the stale one
    let newer = harness.server.answer(second[0].clone());
    let stale = harness.server.answer(first[0].clone());
    harness.runtime.send_raw_msg(newer);
    harness.runtime.send_raw_msg(stale);
    harness.settle();

    let page = harness.state().list.page();
    assert_eq!(page.cursor.index, 2);
    assert_eq!(page.items[0].id, 25);
    assert_eq!(page.range_label(), "21 – 30 of 45");
}

#[test]
fn test_navigation_bounds_are_no_ops() {
    let mut harness = Harness::new(FakeServer::with_numbers(20));
    harness.send(Msg::Refresh);
    harness.settle();

    harness.send(Msg::List(ListMsg::PreviousPage));
    assert!(harness.take_requests().is_empty());

    harness.send(Msg::List(ListMsg::LastPage));
    harness.settle();
    assert_eq!(harness.state().list.page().cursor.index, 1);
    assert!(!harness.state().list.has_next());

    harness.send(Msg::List(ListMsg::NextPage));
    assert!(harness.take_requests().is_empty());
}

#[test]
fn test_empty_server_shows_empty_page() {
    let mut harness = Harness::new(FakeServer::with_numbers(0));
    harness.send(Msg::Refresh);
    harness.settle();

    let state = harness.state();
    assert!(state.list.page().items.is_empty());
    assert_eq!(state.list.page().range_label(), "0 of 0");
    assert!(!state.list.has_next());
    assert!(state.chart.is_empty());
}

#[test]
fn test_page_size_change_requests_new_window() {
    let mut harness = Harness::new(FakeServer::with_numbers(60));
    harness.send(Msg::Refresh);
    harness.settle();
    harness.send(Msg::List(ListMsg::NextPage));
    harness.send(Msg::List(ListMsg::NextPage));
    harness.send(Msg::List(ListMsg::NextPage));
    harness.settle();
    assert_eq!(harness.state().list.page().cursor.offset(), 30);

    harness.send(Msg::List(ListMsg::IncreasePageSize));
    let requests = harness.take_requests();
    assert_eq!(
        requests,
        vec![ApiCommand::FetchList {
            seq: 5,
            limit: 25,
            offset: 25
        }]
    );
}

#[test]
fn test_error_raw_message_reaches_status_line() {
    let mut harness = Harness::new(FakeServer::with_numbers(1));
    harness
        .runtime
        .send_raw_msg(RawMsg::Error("boom".to_string()));
    harness.settle();

    assert_eq!(
        harness.state().system.status_message.as_deref(),
        Some("[ERR: System] boom")
    );
}
