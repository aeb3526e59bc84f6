//! Table view state: sorting, filtering, pagination and column visibility
//!
//! A [`TableState`] is plain data describing what the user asked to see. It
//! never touches the records. [`derive`] combines a state with a borrowed
//! slice of records and produces a [`TableView`]: filtered, then sorted,
//! then paginated, with the visible columns resolved. The source slice is
//! never reordered or copied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Page sizes offered by the rows-per-page selector
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 50, 100];

/// Page size used when nothing else is chosen
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl SortDirection {
    /// Query-string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The other direction
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Parse `asc` / `desc`, case-insensitive
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single sort key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column id
    pub column: String,
    /// Direction
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on a column
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on a column
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Typed value of one cell, used for sorting
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    /// Free text, compared case-insensitively
    Text(&'a str),
    /// Number, compared by total order
    Number(f64),
    /// Point in time
    Timestamp(DateTime<Utc>),
    /// Missing value, always sorted last
    Empty,
}

impl CellValue<'_> {
    /// Wrap an optional number
    #[must_use]
    pub fn number(value: Option<f64>) -> Self {
        value.map_or(Self::Empty, Self::Number)
    }

    /// Whether the cell holds no value
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    const fn kind_rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Timestamp(_) => 1,
            Self::Text(_) => 2,
            Self::Empty => 3,
        }
    }

    /// Ascending comparison of two cells
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

/// Column metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Stable id used in query strings
    pub id: &'static str,
    /// Header label
    pub header: &'static str,
    /// Whether the header toggles sorting
    pub sortable: bool,
    /// Whether the user may hide the column
    pub hideable: bool,
    /// Whether the column starts visible
    pub visible_by_default: bool,
}

impl ColumnDef {
    /// Sortable, hideable, visible column
    #[must_use]
    pub const fn new(id: &'static str, header: &'static str) -> Self {
        Self {
            id,
            header,
            sortable: true,
            hideable: true,
            visible_by_default: true,
        }
    }

    /// Disable sorting on this column
    #[must_use]
    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Prevent hiding this column
    #[must_use]
    pub const fn pinned(mut self) -> Self {
        self.hideable = false;
        self
    }

    /// Start hidden
    #[must_use]
    pub const fn hidden_by_default(mut self) -> Self {
        self.visible_by_default = false;
        self
    }
}

/// A record that can be shown in a table
pub trait TableRecord {
    /// Columns in display order
    fn columns() -> &'static [ColumnDef];

    /// Typed value of a column for this record
    fn cell(&self, column: &str) -> CellValue<'_>;

    /// Fields matched by the free-text filter
    fn search_fields(&self) -> SmallVec<[&str; 2]>;

    /// Sort applied before the user picks one
    fn default_sort() -> Option<SortSpec> {
        None
    }

    /// Look up a column by id
    fn column(id: &str) -> Option<&'static ColumnDef> {
        Self::columns().iter().find(|column| column.id == id)
    }
}

/// What the user asked to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    sort: Option<SortSpec>,
    filter: String,
    page_index: usize,
    page_size: usize,
    hidden_columns: BTreeSet<String>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    /// Empty state with a page size
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            filter: String::new(),
            page_index: 0,
            page_size: page_size.max(1),
            hidden_columns: BTreeSet::new(),
        }
    }

    /// State seeded with a record type's default sort and hidden columns
    #[must_use]
    pub fn for_record<R: TableRecord>(page_size: usize) -> Self {
        let mut state = Self::new(page_size);
        state.sort = R::default_sort();
        state.hidden_columns = R::columns()
            .iter()
            .filter(|column| !column.visible_by_default)
            .map(|column| column.id.to_string())
            .collect();
        state
    }

    /// Current sort
    #[must_use]
    pub const fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Current filter term
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Requested page index (0-based, clamped when deriving)
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Rows per page
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Ids of hidden columns
    #[must_use]
    pub const fn hidden_columns(&self) -> &BTreeSet<String> {
        &self.hidden_columns
    }

    /// Replace the filter term. Always returns to the first page.
    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter = term.into();
        self.page_index = 0;
    }

    /// Set the sort explicitly and return to the first page
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = Some(sort);
        self.page_index = 0;
    }

    /// Drop the sort; rows come back in source order
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.page_index = 0;
    }

    /// Header click: a new column sorts ascending, the current column flips
    pub fn toggle_sort(&mut self, column: &str) {
        let direction = match &self.sort {
            Some(current) if current.column == column => current.direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.set_sort(SortSpec {
            column: column.to_string(),
            direction,
        });
    }

    /// Change rows per page, keeping the first visible row on screen
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        let top_row = self.page_index.saturating_mul(self.page_size);
        self.page_size = page_size;
        self.page_index = top_row / page_size;
    }

    /// Jump to a page (0-based)
    pub const fn set_page_index(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// Return to the first page
    pub const fn reset_page(&mut self) {
        self.page_index = 0;
    }

    /// First page
    pub const fn first_page(&mut self) {
        self.page_index = 0;
    }

    /// Previous page, saturating at the first
    pub const fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Next page, saturating at the last of `page_count`
    pub fn next_page(&mut self, page_count: usize) {
        self.page_index = (self.page_index + 1).min(page_count.saturating_sub(1));
    }

    /// Last page of `page_count`
    pub const fn last_page(&mut self, page_count: usize) {
        self.page_index = page_count.saturating_sub(1);
    }

    /// Show or hide a column
    pub fn set_column_visible(&mut self, column: &str, visible: bool) {
        if visible {
            self.hidden_columns.remove(column);
        } else {
            self.hidden_columns.insert(column.to_string());
        }
    }

    /// Flip a column's visibility
    pub fn toggle_column(&mut self, column: &str) {
        let visible = self.hidden_columns.contains(column);
        self.set_column_visible(column, visible);
    }

    /// Whether a column is currently requested visible
    #[must_use]
    pub fn is_column_visible(&self, column: &str) -> bool {
        !self.hidden_columns.contains(column)
    }
}

/// Which of the mutually exclusive table bodies to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    /// At least one row to show
    Rows,
    /// The source collection is empty
    NoData,
    /// Records exist but none pass the filters
    NoMatches,
}

/// Derived, read-only view of a record slice
#[derive(Debug, Clone)]
pub struct TableView<'a, R> {
    /// Rows on the current page, in display order
    pub rows: Vec<&'a R>,
    /// Number of records in the source
    pub total_records: usize,
    /// Number of records passing the filters
    pub total_matches: usize,
    /// Page shown (0-based, clamped)
    pub page_index: usize,
    /// Rows per page
    pub page_size: usize,
    /// Number of pages, 0 when nothing matches
    pub page_count: usize,
    /// Effective sort, `None` if the requested column cannot sort
    pub sort: Option<SortSpec>,
    /// Visible columns in display order
    pub visible_columns: Vec<&'static ColumnDef>,
    /// Body to render
    pub status: ViewStatus,
}

/// Serializable summary of a [`TableView`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewMeta {
    /// Number of records in the source
    pub total_records: usize,
    /// Number of records passing the filters
    pub total_matches: usize,
    /// Page shown (1-based)
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Number of pages
    pub page_count: usize,
    /// Body status
    pub status: ViewStatus,
}

impl<R> TableView<'_, R> {
    /// Page shown, 1-based for display
    #[must_use]
    pub const fn page_number(&self) -> usize {
        self.page_index + 1
    }

    /// Whether a previous page exists
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Whether a next page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// Summary for JSON responses and footers
    #[must_use]
    pub const fn meta(&self) -> ViewMeta {
        ViewMeta {
            total_records: self.total_records,
            total_matches: self.total_matches,
            page: self.page_number(),
            page_size: self.page_size,
            page_count: self.page_count,
            status: self.status,
        }
    }
}

/// Case-insensitive substring match of `term` against any search field.
/// Only the empty term matches everything; whitespace is part of the term.
#[must_use]
pub fn matches_filter<R: TableRecord>(record: &R, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Derive the view with only the free-text filter applied
#[must_use]
pub fn derive<'a, R: TableRecord>(records: &'a [R], state: &TableState) -> TableView<'a, R> {
    derive_with(records, state, |_| true)
}

/// Derive the view with an extra predicate ANDed with the free-text filter
#[must_use]
pub fn derive_with<'a, R, P>(records: &'a [R], state: &TableState, predicate: P) -> TableView<'a, R>
where
    R: TableRecord,
    P: Fn(&R) -> bool,
{
    let mut matched: Vec<&'a R> = records
        .iter()
        .filter(|record| predicate(*record) && matches_filter(*record, &state.filter))
        .collect();

    let sort = state
        .sort
        .as_ref()
        .filter(|spec| R::column(&spec.column).is_some_and(|column| column.sortable))
        .cloned();

    if let Some(spec) = &sort {
        // sort_by is stable: equal keys keep source order in both directions
        matched.sort_by(|a, b| {
            compare_for_sort(&a.cell(&spec.column), &b.cell(&spec.column), spec.direction)
        });
    }

    let total_matches = matched.len();
    let page_size = state.page_size.max(1);
    let page_count = total_matches.div_ceil(page_size);
    let page_index = state.page_index.min(page_count.saturating_sub(1));

    let rows = matched
        .into_iter()
        .skip(page_index * page_size)
        .take(page_size)
        .collect();

    let visible_columns = R::columns()
        .iter()
        .filter(|column| !column.hideable || state.is_column_visible(column.id))
        .collect();

    let status = if records.is_empty() {
        ViewStatus::NoData
    } else if total_matches == 0 {
        ViewStatus::NoMatches
    } else {
        ViewStatus::Rows
    };

    TableView {
        rows,
        total_records: records.len(),
        total_matches,
        page_index,
        page_size,
        page_count,
        sort,
        visible_columns,
        status,
    }
}

fn compare_for_sort(a: &CellValue<'_>, b: &CellValue<'_>, direction: SortDirection) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.compare(b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}
