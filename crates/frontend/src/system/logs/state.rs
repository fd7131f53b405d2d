//! State container of the logs page
//!
//! All transitions are plain methods so the fetch/ordering rules can be
//! exercised without rendering anything.

use chrono::NaiveDate;
use contracts::system::logs::{
    ExportLogsRequest, LogEntry, LogFilter, LogsQuery, LogsResponse, UserFilter,
};
use leptos::prelude::*;

use super::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum LogsAction {
    SetDateFrom(Option<NaiveDate>),
    SetDateTo(Option<NaiveDate>),
    SetUser(UserFilter),
    /// Search term after the debounce interval elapsed
    ApplySearch(String),
    Refresh,
}

/// Export payload plus the fetch that brings the table in line with it
#[derive(Debug, Clone, PartialEq)]
pub struct ExportStart {
    pub request: ExportLogsRequest,
    pub fetch: Option<FetchTicket>,
}

/// A request the view must send; `seq` identifies its response later
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: LogsQuery,
}

#[derive(Debug, Clone, Default)]
pub struct LogsPageState {
    pub filter: LogFilter,
    pub rows: Vec<LogEntry>,
    /// Options of the user dropdown
    pub usernames: Vec<String>,
    pub is_loading: bool,
    pub is_exporting: bool,
    /// Outcome of the last fetch; replaced by every fetch
    pub error: Option<String>,
    /// Outcome of the last export; fetches never touch it
    pub export_error: Option<String>,
    latest_seq: u64,
}

impl LogsPageState {
    pub fn new(filter: LogFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    /// Apply a filter change. Returns a ticket when a fetch has to be issued.
    pub fn apply(&mut self, action: LogsAction) -> Option<FetchTicket> {
        let changed = match action {
            LogsAction::SetDateFrom(date) => replace(&mut self.filter.date_from, date),
            LogsAction::SetDateTo(date) => replace(&mut self.filter.date_to, date),
            LogsAction::SetUser(user) => replace(&mut self.filter.user, user),
            LogsAction::ApplySearch(term) => {
                replace(&mut self.filter.search, term.trim().to_string())
            }
            LogsAction::Refresh => true,
        };
        if changed {
            self.issue_fetch()
        } else {
            None
        }
    }

    /// Start a fetch for the current filter. Nothing is sent until both dates are set.
    pub fn issue_fetch(&mut self) -> Option<FetchTicket> {
        if !self.filter.has_date_range() {
            return None;
        }
        self.latest_seq += 1;
        self.is_loading = true;
        self.error = None;
        Some(FetchTicket {
            seq: self.latest_seq,
            query: self.filter.to_query(),
        })
    }

    /// Apply the outcome of request `seq`. Returns false if a newer request
    /// was issued meanwhile and the outcome was dropped.
    pub fn complete(&mut self, seq: u64, outcome: Result<LogsResponse, ApiError>) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.is_loading = false;
        match outcome {
            Ok(response) => {
                self.rows = response.data;
                if let Some(usernames) = response.usernames {
                    self.usernames = usernames;
                }
                self.error = None;
            }
            Err(err) => {
                self.rows.clear();
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Start an export of the filter with the search box content as typed,
    /// even if its debounce interval has not elapsed yet. `None` while an
    /// export is already running.
    pub fn begin_export(&mut self, typed_search: &str) -> Option<ExportStart> {
        if self.is_exporting {
            return None;
        }
        let fetch = self.apply(LogsAction::ApplySearch(typed_search.to_string()));
        self.is_exporting = true;
        self.export_error = None;
        Some(ExportStart {
            request: self.filter.to_export_request(),
            fetch,
        })
    }

    pub fn finish_export(&mut self, result: Result<(), String>) {
        self.is_exporting = false;
        self.export_error = result.err();
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

pub fn create_state(filter: LogFilter) -> RwSignal<LogsPageState> {
    RwSignal::new(LogsPageState::new(filter))
}
