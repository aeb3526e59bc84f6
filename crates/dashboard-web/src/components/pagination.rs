//! Pagination footer for navigating through table pages

use crate::query::TableLinks;
use dashboard_core::table::TableView;
use dashboard_core::{TableRecord, TableState};
use leptos::prelude::*;
use std::fmt::Write as _;

/// One rows-per-page choice; the current size has no link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizeChoice {
    /// Rows per page
    pub size: usize,
    /// Link switching to this size
    pub href: Option<String>,
}

/// Everything the footer shows, with its links resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterModel {
    /// "Showing X of Y ..." line
    pub summary: String,
    /// Rows-per-page choices in display order
    pub page_sizes: Vec<PageSizeChoice>,
    /// "Page X of Y"
    pub position: String,
    /// First page link, `None` on the first page
    pub first: Option<String>,
    /// Previous page link
    pub previous: Option<String>,
    /// Next page link, `None` on the last page
    pub next: Option<String>,
    /// Last page link
    pub last: Option<String>,
}

impl FooterModel {
    /// Footer for `view`, counting rows as `noun`
    #[must_use]
    pub fn new<R: TableRecord>(
        view: &TableView<'_, R>,
        links: &TableLinks<'_, R>,
        page_sizes: &[usize],
        noun: &str,
    ) -> Self {
        let mut summary = format!(
            "Showing {} of {} {noun}",
            view.rows.len(),
            view.total_matches
        );
        if view.total_matches != view.total_records {
            let _ = write!(summary, " (filtered from {})", view.total_records);
        }

        let page_sizes = page_sizes
            .iter()
            .map(|&size| PageSizeChoice {
                size,
                href: (size != view.page_size)
                    .then(|| links.with(|state| state.set_page_size(size))),
            })
            .collect();

        let page_count = view.page_count;
        let back = view.has_previous();
        let forward = view.has_next();
        Self {
            summary,
            page_sizes,
            position: format!("Page {} of {}", view.page_number(), page_count.max(1)),
            first: back.then(|| links.with(TableState::first_page)),
            previous: back.then(|| links.with(TableState::previous_page)),
            next: forward.then(|| links.with(|state| state.next_page(page_count))),
            last: forward.then(|| links.with(|state| state.last_page(page_count))),
        }
    }
}

/// "Showing X of Y", rows-per-page choices and first/prev/next/last links
#[component]
pub fn Pagination(
    /// Resolved footer content
    model: FooterModel,
) -> impl IntoView {
    let FooterModel {
        summary,
        page_sizes,
        position,
        first,
        previous,
        next,
        last,
    } = model;

    view! {
        <div class="pagination">
            <div class="pagination-summary">{summary}</div>
            <div class="page-size">
                <span>"Rows per page:"</span>
                {page_sizes
                    .into_iter()
                    .map(|choice| match choice.href {
                        Some(href) => view! { <a href=href>{choice.size.to_string()}</a> }.into_any(),
                        None => {
                            view! { <strong aria-current="true">{choice.size.to_string()}</strong> }
                                .into_any()
                        }
                    })
                    .collect_view()}
            </div>
            <div class="pagination-info">{position}</div>
            <div class="pagination-controls">
                <NavButton label="First" symbol="\u{ab}" href=first/>
                <NavButton label="Previous" symbol="\u{2039}" href=previous/>
                <NavButton label="Next" symbol="\u{203a}" href=next/>
                <NavButton label="Last" symbol="\u{bb}" href=last/>
            </div>
        </div>
    }
}

#[component]
fn NavButton(label: &'static str, symbol: &'static str, href: Option<String>) -> impl IntoView {
    let disabled = href.is_none();
    view! {
        <a
            class="pagination-btn"
            class:disabled=disabled
            href=href
            aria-disabled={disabled.then_some("true")}
            aria-label=label
        >
            {symbol}
        </a>
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::html::render_html;
    use dashboard_core::table::{PAGE_SIZE_OPTIONS, derive};
    use dashboard_core::{MarketAsset, StatusFilter};
    use pretty_assertions::assert_eq;

    fn assets(count: u32) -> Vec<MarketAsset> {
        (1..=count)
            .map(|rank| {
                serde_json::from_value(serde_json::json!({
                    "id": format!("coin-{rank}"),
                    "symbol": format!("c{rank}"),
                    "name": format!("Coin {rank}"),
                    "market_cap_rank": rank,
                }))
                .unwrap()
            })
            .collect()
    }

    fn model(data: &[MarketAsset], state: &TableState) -> FooterModel {
        let view = derive(data, state);
        let links =
            TableLinks::<MarketAsset>::new("/dashboard", state, view.page_index, StatusFilter::All);
        FooterModel::new(&view, &links, &PAGE_SIZE_OPTIONS, "cryptocurrencies")
    }

    #[test]
    fn test_middle_page_links() {
        let data = assets(35);
        let mut state = TableState::for_record::<MarketAsset>(10);
        state.set_page_index(1);
        let model = model(&data, &state);

        assert_eq!(model.summary, "Showing 10 of 35 cryptocurrencies");
        assert_eq!(model.position, "Page 2 of 4");
        assert_eq!(model.first.as_deref(), Some("/dashboard?size=10"));
        assert_eq!(model.next.as_deref(), Some("/dashboard?page=3&size=10"));
        assert_eq!(model.last.as_deref(), Some("/dashboard?page=4&size=10"));
        // Page 2 of size 10 starts at row 10, which is page 1 of size 20
        assert_eq!(
            model.page_sizes.get(1),
            Some(&PageSizeChoice {
                size: 20,
                href: Some("/dashboard?size=20".to_string())
            })
        );

        let html = render_html(move || view! { <Pagination model/> });
        assert!(html.contains("<strong aria-current=\"true\">10</strong>"));
        assert!(html.contains("<a href=\"/dashboard?size=30\">30</a>"));
        assert!(html.contains("href=\"/dashboard?page=3&amp;size=10\" aria-label=\"Next\""));
        assert!(!html.contains("aria-disabled"));
    }

    #[test]
    fn test_single_page_disables_navigation() {
        let data = assets(3);
        let state = TableState::for_record::<MarketAsset>(10);
        let model = model(&data, &state);
        assert_eq!(model.position, "Page 1 of 1");
        assert!(model.first.is_none() && model.last.is_none());

        let html = render_html(move || view! { <Pagination model/> });
        assert_eq!(html.matches("aria-disabled=\"true\"").count(), 4);
        assert_eq!(html.matches("class=\"pagination-btn disabled\"").count(), 4);
    }

    #[test]
    fn test_filtered_summary() {
        let data = assets(12);
        let mut state = TableState::for_record::<MarketAsset>(10);
        state.set_filter("coin 1");
        // "Coin 1", "Coin 10", "Coin 11", "Coin 12"
        assert_eq!(
            model(&data, &state).summary,
            "Showing 4 of 4 cryptocurrencies (filtered from 12)"
        );
    }

    #[test]
    fn test_empty_view_reports_one_page() {
        let state = TableState::for_record::<MarketAsset>(10);
        let model = model(&[], &state);
        assert_eq!(model.summary, "Showing 0 of 0 cryptocurrencies");
        assert_eq!(model.position, "Page 1 of 1");
    }
}
