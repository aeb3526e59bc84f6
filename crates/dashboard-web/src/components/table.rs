//! Table chrome: search form, sortable headers, column toggles, empty rows

use crate::query::TableLinks;
use dashboard_core::table::TableView;
use dashboard_core::{SortDirection, TableRecord};
use leptos::prelude::*;

/// GET form for the free-text search. Children go before the submit button
/// (e.g. a status select). Submitting returns to the first page.
#[component]
pub fn SearchForm(
    /// Page the form submits to
    #[prop(into)]
    action: String,
    /// Current search term
    #[prop(into)]
    filter: String,
    /// Placeholder, also used as the accessible label
    #[prop(into)]
    placeholder: String,
    /// Table state carried over as hidden fields
    hidden: Vec<(&'static str, String)>,
    /// Extra controls
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let label = placeholder.clone();
    view! {
        <form class="search" method="get" action=action>
            <input type="search" name="q" value=filter placeholder=placeholder aria-label=label/>
            {hidden
                .into_iter()
                .map(|(name, value)| view! { <input type="hidden" name=name value=value/> })
                .collect_view()}
            {children.map(|children| children())}
            <button type="submit">"Search"</button>
        </form>
    }
}

/// Sort state of one header cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSort {
    /// `aria-sort` value
    pub aria: &'static str,
    /// Link toggling the sort on this column
    pub href: String,
}

/// One data column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Header text, with the sort indicator when sorted
    pub label: String,
    /// Present on sortable columns
    pub sort: Option<HeaderSort>,
}

/// Header cells for the visible columns of `view`
#[must_use]
pub fn header_cells<R: TableRecord>(
    view: &TableView<'_, R>,
    links: &TableLinks<'_, R>,
) -> Vec<HeaderCell> {
    view.visible_columns
        .iter()
        .map(|column| {
            if !column.sortable {
                return HeaderCell {
                    label: column.header.to_string(),
                    sort: None,
                };
            }
            let current = view
                .sort
                .as_ref()
                .filter(|sort| sort.column == column.id)
                .map(|sort| sort.direction);
            let (aria, indicator) = match current {
                Some(SortDirection::Asc) => ("ascending", " \u{25b2}"),
                Some(SortDirection::Desc) => ("descending", " \u{25bc}"),
                None => ("none", ""),
            };
            HeaderCell {
                label: format!("{}{indicator}", column.header),
                sort: Some(HeaderSort {
                    aria,
                    href: links.with(|state| state.toggle_sort(column.id)),
                }),
            }
        })
        .collect()
}

/// Header row with sort links on sortable columns
#[component]
pub fn TableHead(
    /// Data column headers
    cells: Vec<HeaderCell>,
    /// Plain headers after the data columns
    #[prop(optional)]
    trailing: Vec<&'static str>,
) -> impl IntoView {
    view! {
        <thead>
            <tr>
                {cells
                    .into_iter()
                    .map(|cell| match cell.sort {
                        Some(sort) => {
                            view! {
                                <th aria-sort={sort.aria}>
                                    <a href={sort.href}>{cell.label}</a>
                                </th>
                            }
                                .into_any()
                        }
                        None => view! { <th>{cell.label}</th> }.into_any(),
                    })
                    .collect_view()}
                {trailing.into_iter().map(|header| view! { <th>{header}</th> }).collect_view()}
            </tr>
        </thead>
    }
}

/// One entry of the column visibility dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnToggle {
    /// Column header
    pub header: &'static str,
    /// Whether the column is shown now
    pub visible: bool,
    /// Link flipping the column's visibility
    pub href: String,
}

/// Toggles for the hideable columns of `R`
#[must_use]
pub fn column_toggles<R: TableRecord>(links: &TableLinks<'_, R>) -> Vec<ColumnToggle> {
    R::columns()
        .iter()
        .filter(|column| column.hideable)
        .map(|column| ColumnToggle {
            header: column.header,
            visible: links.state().is_column_visible(column.id),
            href: links.with(|state| state.toggle_column(column.id)),
        })
        .collect()
}

/// Dropdown of visibility toggles
#[component]
pub fn ColumnToggles(
    /// One entry per hideable column
    toggles: Vec<ColumnToggle>,
) -> impl IntoView {
    view! {
        <details class="columns">
            <summary>"Columns"</summary>
            <ul>
                {toggles
                    .into_iter()
                    .map(|toggle| {
                        let mark = if toggle.visible { "\u{2611}" } else { "\u{2610}" };
                        view! {
                            <li>
                                <a href={toggle.href} aria-pressed={toggle.visible.to_string()}>
                                    {format!("{mark} {}", toggle.header)}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </details>
    }
}

/// Single full-width row for an empty body
#[component]
pub fn EmptyRow(
    /// Number of columns to span
    colspan: usize,
    /// Why the table is empty
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <tr>
            <td colspan={colspan.to_string()} class="empty">{message}</td>
        </tr>
    }
}
