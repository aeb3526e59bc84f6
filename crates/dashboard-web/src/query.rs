//! Table state carried in the URL
//!
//! Every table interaction is a link or a GET form. [`TableQuery`] turns the
//! query string into a [`TableState`]; [`TableLinks`] goes the other way by
//! applying a state operation to a copy and serializing the result.

use dashboard_core::config::TableConfig;
use dashboard_core::{SortDirection, SortSpec, StatusFilter, TableRecord, TableState};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::marker::PhantomData;

/// Query parameters understood by the table pages
///
/// Everything is read as text so a malformed value falls back to its default
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableQuery {
    /// Free-text search
    pub q: Option<String>,
    /// Sort column id
    pub sort: Option<String>,
    /// `asc` or `desc`
    pub dir: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Rows per page
    pub size: Option<String>,
    /// Comma-separated hidden column ids; replaces the default set when present
    pub hide: Option<String>,
    /// Status filter (users table)
    pub status: Option<String>,
    /// Any value forces a refetch
    pub refresh: Option<String>,
}

impl TableQuery {
    /// Rebuild the table state for record type `R`
    #[must_use]
    pub fn to_state<R: TableRecord>(&self, table: &TableConfig) -> TableState {
        let size = self.size.as_deref().and_then(|s| s.trim().parse().ok());
        let mut state = TableState::for_record::<R>(table.resolve_page_size(size));

        if let Some(column) = self.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let direction = self
                .dir
                .as_deref()
                .and_then(SortDirection::parse)
                .unwrap_or_default();
            state.set_sort(SortSpec {
                column: column.to_string(),
                direction,
            });
        }

        if let Some(hide) = &self.hide {
            for column in R::columns() {
                state.set_column_visible(column.id, true);
            }
            for id in hide.split(',').map(str::trim).filter(|id| !id.is_empty()) {
                state.set_column_visible(id, false);
            }
        }

        if let Some(q) = &self.q {
            state.set_filter(q.as_str());
        }

        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(1);
        state.set_page_index(page.saturating_sub(1));
        state
    }

    /// Status filter; unknown values mean no restriction
    #[must_use]
    pub fn status_filter(&self) -> StatusFilter {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Whether the caller asked for fresh data
    #[must_use]
    pub const fn wants_refresh(&self) -> bool {
        self.refresh.is_some()
    }
}

/// Builds hrefs for table controls relative to the state being shown
#[derive(Debug, Clone)]
pub struct TableLinks<'a, R> {
    base: &'a str,
    state: TableState,
    status: StatusFilter,
    default_hidden: BTreeSet<String>,
    record: PhantomData<fn() -> R>,
}

impl<'a, R: TableRecord> TableLinks<'a, R> {
    /// Links for `state` shown at `base`. `page_index` is the page actually
    /// rendered, which may differ from the requested one after clamping.
    #[must_use]
    pub fn new(base: &'a str, state: &TableState, page_index: usize, status: StatusFilter) -> Self {
        let mut state = state.clone();
        state.set_page_index(page_index);
        let default_hidden = TableState::for_record::<R>(state.page_size())
            .hidden_columns()
            .clone();
        Self {
            base,
            state,
            status,
            default_hidden,
            record: PhantomData,
        }
    }

    /// Path the links point at
    #[must_use]
    pub const fn base(&self) -> &'a str {
        self.base
    }

    /// State the links are relative to
    #[must_use]
    pub const fn state(&self) -> &TableState {
        &self.state
    }

    /// Status filter the links carry
    #[must_use]
    pub const fn status(&self) -> StatusFilter {
        self.status
    }

    /// Link to the current view
    #[must_use]
    pub fn current(&self) -> String {
        self.href(&self.state, self.status)
    }

    /// Link to the view after applying `change` to a copy of the state
    #[must_use]
    pub fn with(&self, change: impl FnOnce(&mut TableState)) -> String {
        let mut next = self.state.clone();
        change(&mut next);
        self.href(&next, self.status)
    }

    /// Link to the view with another status filter, back on the first page
    #[must_use]
    pub fn with_status(&self, status: StatusFilter) -> String {
        let mut next = self.state.clone();
        next.reset_page();
        self.href(&next, status)
    }

    /// Link that keeps the view but forces a refetch
    #[must_use]
    pub fn refresh(&self) -> String {
        let mut pairs = self.pairs(&self.state, self.status);
        pairs.push(("refresh", "1".to_string()));
        self.build(&pairs)
    }

    /// Parameters a GET form must carry as hidden fields to keep everything
    /// except the search term, status and page
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        self.pairs(&self.state, self.status)
            .into_iter()
            .filter(|(key, _)| !matches!(*key, "q" | "page" | "status"))
            .collect()
    }

    fn href(&self, state: &TableState, status: StatusFilter) -> String {
        self.build(&self.pairs(state, status))
    }

    fn build(&self, pairs: &[(&'static str, String)]) -> String {
        if pairs.is_empty() {
            return self.base.to_string();
        }
        let query = pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.base)
    }

    fn pairs(&self, state: &TableState, status: StatusFilter) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !state.filter().is_empty() {
            pairs.push(("q", state.filter().to_string()));
        }
        if status.is_active() {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(sort) = state.sort()
            && Some(sort) != R::default_sort().as_ref()
        {
            pairs.push(("sort", sort.column.clone()));
            pairs.push(("dir", sort.direction.as_str().to_string()));
        }
        if state.page_index() > 0 {
            pairs.push(("page", (state.page_index() + 1).to_string()));
        }
        pairs.push(("size", state.page_size().to_string()));
        if state.hidden_columns() != &self.default_hidden {
            let hidden: Vec<&str> = state.hidden_columns().iter().map(String::as_str).collect();
            pairs.push(("hide", hidden.join(",")));
        }
        pairs
    }
}
