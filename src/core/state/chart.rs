use serde::{Deserialize, Serialize};

use crate::{
    core::{cmd::Cmd, msg::chart::ChartMsg, state::LoadStatus},
    domain::{
        chart::{ChartOrder, ChartSeries, DEFAULT_CHART_LEN},
        request::{RequestSeq, RequestTracker},
    },
    infrastructure::api::FetchError,
};

/// Line chart of the most recent values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartState {
    series: ChartSeries,
    status: LoadStatus,
    tracker: RequestTracker,
    len: usize,
    order: ChartOrder,
    last_error: Option<FetchError>,
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_LEN, ChartOrder::default())
    }
}

impl ChartState {
    pub fn new(len: usize, order: ChartOrder) -> Self {
        Self {
            series: ChartSeries {
                order,
                ..Default::default()
            },
            status: LoadStatus::Idle,
            tracker: RequestTracker::new(),
            len,
            order,
            last_error: None,
        }
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Number of records the chart plots at most
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn order(&self) -> ChartOrder {
        self.order
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_in_flight()
    }

    pub fn is_current(&self, seq: RequestSeq) -> bool {
        self.tracker.is_current(seq)
    }

    pub fn update(&mut self, msg: ChartMsg) -> Vec<Cmd> {
        match msg {
            ChartMsg::Load => {
                let seq = self.tracker.begin();
                self.status = LoadStatus::Loading;
                vec![Cmd::fetch_chart(seq, self.len)]
            }

            ChartMsg::Fetched { seq, result } => {
                if !self.tracker.settle(seq) {
                    log::debug!("Discarding stale chart response #{seq}");
                    return vec![];
                }
                match result {
                    Ok(response) => {
                        self.series =
                            ChartSeries::from_newest_first(&response.results, self.len, self.order);
                        self.status = LoadStatus::Loaded;
                        self.last_error = None;
                        vec![]
                    }
                    Err(err) => {
                        self.status = LoadStatus::Error;
                        let message = format!("Failed to load chart data: {err}");
                        self.last_error = Some(err);
                        vec![Cmd::LogError { message }]
                    }
                }
            }
        }
    }
}
