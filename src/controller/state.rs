use std::time::Duration;

use crate::domain::page::{Filters, PageRequest};
use crate::domain::types::{PageLimit, PageNumber};
use crate::dto::list::{ErrorInfo, FetchPhase, ListView};
use crate::pagination::PageWindow;

/// Page sizes offered by the management screens.
pub const DEFAULT_PAGE_SIZES: [usize; 3] = [5, 10, 15];

/// Tunables shared by every controller built from one configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerOptions {
    pub page_sizes: Vec<PageLimit>,
    pub default_limit: PageLimit,
    pub request_timeout: Duration,
    /// Jump back to page 1 after a successful create.
    pub reset_page_on_create: bool,
}

impl ControllerOptions {
    pub fn allows(&self, limit: usize) -> bool {
        self.page_sizes.iter().any(|size| size.get() == limit)
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        let page_sizes: Vec<PageLimit> = DEFAULT_PAGE_SIZES
            .iter()
            .filter_map(|&size| PageLimit::new(size).ok())
            .collect();
        Self {
            page_sizes,
            default_limit: PageLimit::DEFAULT,
            request_timeout: Duration::from_secs(30),
            reset_page_on_create: false,
        }
    }
}

/// What happened to a navigation or fetch request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was written into state.
    Applied,
    /// The fetch failed and state was reset to empty.
    Failed(ErrorInfo),
    /// A newer fetch was issued before this one resolved.
    Stale,
    /// The controller was closed before this one resolved.
    Abandoned,
    /// The request was out of range; nothing was fetched.
    Rejected,
}

/// Mutable state owned by one controller.
#[derive(Clone, Debug)]
pub struct ControllerState<T> {
    pub rows: Vec<T>,
    pub total: usize,
    pub page: PageNumber,
    pub limit: PageLimit,
    pub filters: Filters,
    pub phase: FetchPhase,
    pub last_error: Option<ErrorInfo>,
    pub(crate) issued: u64,
    pub(crate) closed: bool,
}

impl<T> ControllerState<T> {
    pub fn new(limit: PageLimit) -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
            page: PageNumber::FIRST,
            limit,
            filters: Filters::new(),
            phase: FetchPhase::Idle,
            last_error: None,
            issued: 0,
            closed: false,
        }
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page.get(), self.limit.get(), self.total)
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit).filters(self.filters.clone())
    }

    pub(crate) fn fail_empty(&mut self, error: ErrorInfo) {
        self.rows.clear();
        self.total = 0;
        self.phase = FetchPhase::Errored;
        self.last_error = Some(error);
    }
}

impl<T: Clone> ControllerState<T> {
    pub fn view(&self) -> ListView<T> {
        ListView::new(
            self.rows.clone(),
            self.window(),
            self.phase,
            self.last_error.clone(),
        )
    }
}
