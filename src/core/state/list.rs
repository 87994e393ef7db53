use serde::{Deserialize, Serialize};

use crate::{
    core::{cmd::Cmd, msg::list::ListMsg, state::LoadStatus},
    domain::{
        page::{Page, PageCursor},
        request::{RequestSeq, RequestTracker},
    },
    infrastructure::api::FetchError,
};

/// Paginated table of generated numbers
///
/// `page` is the last successfully loaded page and is what the table shows.
/// `cursor` is the page most recently asked for; it runs ahead of `page.cursor`
/// while a request is in flight and falls back to it when that request fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListState {
    page: Page,
    cursor: PageCursor,
    status: LoadStatus,
    tracker: RequestTracker,
    page_size_options: Vec<usize>,
    last_error: Option<FetchError>,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(PageCursor::default().size, vec![5, 10, 25, 50])
    }
}

impl ListState {
    pub fn new(page_size: usize, page_size_options: Vec<usize>) -> Self {
        let cursor = PageCursor::new(0, page_size);
        Self {
            page: Page::new(vec![], 0, cursor),
            cursor,
            status: LoadStatus::Idle,
            tracker: RequestTracker::new(),
            page_size_options,
            last_error: None,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
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

    pub fn has_next(&self) -> bool {
        self.cursor.has_next(self.page.total_count)
    }

    pub fn has_previous(&self) -> bool {
        self.cursor.has_previous()
    }

    /// List-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: ListMsg) -> Vec<Cmd> {
        match msg {
            ListMsg::Load => self.request(),

            ListMsg::NextPage => self.navigate(self.cursor.next(self.page.total_count)),
            ListMsg::PreviousPage => self.navigate(self.cursor.previous()),
            ListMsg::FirstPage => self.navigate(self.cursor.first()),
            ListMsg::LastPage => self.navigate(self.cursor.last(self.page.total_count)),

            ListMsg::IncreasePageSize => {
                let current = self.cursor.size;
                match self.page_size_options.iter().find(|s| **s > current) {
                    Some(size) => self.update(ListMsg::SetPageSize(*size)),
                    None => vec![],
                }
            }

            ListMsg::DecreasePageSize => {
                let current = self.cursor.size;
                match self.page_size_options.iter().rev().find(|s| **s < current) {
                    Some(size) => self.update(ListMsg::SetPageSize(*size)),
                    None => vec![],
                }
            }

            ListMsg::SetPageSize(size) => {
                if size == 0 || size == self.cursor.size {
                    return vec![];
                }
                self.navigate(Some(self.cursor.resized(size)))
            }

            ListMsg::Fetched { seq, result } => {
                if !self.tracker.settle(seq) {
                    log::debug!("Discarding stale list response #{seq}");
                    return vec![];
                }
                match result {
                    Ok(response) => {
                        self.page = Page::new(response.results, response.count as usize, self.cursor);
                        self.status = LoadStatus::Loaded;
                        self.last_error = None;
                        vec![]
                    }
                    Err(err) => {
                        self.cursor = self.page.cursor;
                        self.status = LoadStatus::Error;
                        let message = format!("Failed to load numbers: {err}");
                        self.last_error = Some(err);
                        vec![Cmd::LogError { message }]
                    }
                }
            }
        }
    }

    fn navigate(&mut self, target: Option<PageCursor>) -> Vec<Cmd> {
        match target {
            Some(cursor) => {
                self.cursor = cursor;
                self.request()
            }
            None => vec![],
        }
    }

    fn request(&mut self) -> Vec<Cmd> {
        let seq = self.tracker.begin();
        self.status = LoadStatus::Loading;
        vec![Cmd::fetch_list(seq, self.cursor.limit(), self.cursor.offset())]
    }
}
