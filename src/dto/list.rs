//! Snapshot handed to whatever renders a management screen.

use serde::Serialize;

use crate::pagination::PageWindow;

/// Message shown in place of rows when a page is empty.
pub const EMPTY_STATE_MESSAGE: &str = "No records found";

/// Fetch cycle state of a list controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Classification of a failure, independent of the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The request never reached the server or no response arrived.
    Network,
    /// No response within the configured bound.
    Timeout,
    /// The server answered with `status != 1`.
    Application,
    /// Rejected client-side before any request was sent.
    Validation,
    /// The response could not be decoded into rows.
    Decode,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Everything a list screen needs to draw itself.
#[derive(Clone, Debug, Serialize)]
pub struct ListView<T> {
    pub rows: Vec<T>,
    pub window: PageWindow,
    pub label: String,
    pub pages: Vec<Option<usize>>,
    pub has_previous: bool,
    pub has_next: bool,
    pub phase: FetchPhase,
    pub error: Option<ErrorInfo>,
}

impl<T> ListView<T> {
    pub fn new(
        rows: Vec<T>,
        window: PageWindow,
        phase: FetchPhase,
        error: Option<ErrorInfo>,
    ) -> Self {
        Self {
            rows,
            label: window.label(),
            pages: window.links(),
            has_previous: window.has_previous(),
            has_next: window.has_next(),
            window,
            phase,
            error,
        }
    }

    /// `Some(EMPTY_STATE_MESSAGE)` once a fetch has settled with no rows.
    pub fn empty_state(&self) -> Option<&'static str> {
        let settled = matches!(self.phase, FetchPhase::Loaded | FetchPhase::Errored);
        (settled && self.rows.is_empty()).then_some(EMPTY_STATE_MESSAGE)
    }
}
