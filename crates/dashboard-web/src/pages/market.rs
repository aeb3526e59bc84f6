//! Cryptocurrency market table page

use crate::components::loading::{LoadFailed, Loading, OutdatedNotice};
use crate::components::pagination::{FooterModel, Pagination};
use crate::components::table::{
    ColumnToggles, EmptyRow, SearchForm, TableHead, column_toggles, header_cells,
};
use crate::fetch::Loaded;
use crate::html::Layout;
use crate::query::TableLinks;
use dashboard_client::Session;
use dashboard_core::config::TableConfig;
use dashboard_core::table::derive;
use dashboard_core::utils::{
    format_large_currency, format_optional_currency, format_percent_change, format_supply,
    format_timestamp,
};
use dashboard_core::{MarketAsset, StatusFilter, TableState, ViewStatus};
use leptos::prelude::*;

/// Path of the market page
pub const PATH: &str = "/dashboard";

/// Render the market page for a load outcome and table state
#[must_use]
pub fn render(
    session: &Session,
    loaded: &Loaded<Vec<MarketAsset>>,
    state: &TableState,
    table: &TableConfig,
) -> String {
    let layout = Layout::new("Cryptocurrency Market", PATH, session);
    match loaded {
        Loaded::Loading => layout
            .refresh(2)
            .render(view! { <Loading message="Loading cryptocurrency data..."/> }),
        Loaded::Failed => layout.render(view! {
            <LoadFailed message="Failed to load market data." retry_href={format!("{PATH}?refresh=1")}/>
        }),
        Loaded::Ready { data, outdated } => {
            layout.render(market_table(data, state, table, *outdated))
        }
    }
}

fn market_table(
    assets: &[MarketAsset],
    state: &TableState,
    table: &TableConfig,
    outdated: bool,
) -> AnyView {
    let derived = derive(assets, state);
    let links = TableLinks::<MarketAsset>::new(PATH, state, derived.page_index, StatusFilter::All);
    let refresh = links.refresh();
    let notice = outdated.then(|| view! { <OutdatedNotice retry_href={refresh.clone()}/> });
    let filter = state.filter().to_string();
    let hidden = links.form_fields();
    let toggles = column_toggles(&links);
    let cells = header_cells(&derived, &links);
    let footer = FooterModel::new(
        &derived,
        &links,
        &table.page_size_options,
        "cryptocurrencies",
    );

    let colspan = derived.visible_columns.len();
    let body = match derived.status {
        ViewStatus::NoData => view! { <EmptyRow colspan message="No results found."/> }.into_any(),
        ViewStatus::NoMatches => {
            view! { <EmptyRow colspan message="No cryptocurrencies match your search."/> }
                .into_any()
        }
        ViewStatus::Rows => derived
            .rows
            .iter()
            .map(|asset| {
                let row = derived
                    .visible_columns
                    .iter()
                    .map(|column| view! { <td>{cell(asset, column.id)}</td> })
                    .collect_view();
                view! { <tr>{row}</tr> }
            })
            .collect_view()
            .into_any(),
    };

    view! {
        {notice}
        <div class="toolbar">
            <SearchForm action=PATH filter placeholder="Search by name or symbol..." hidden/>
            <ColumnToggles toggles/>
            <a class="refresh" href=refresh>"Refresh"</a>
        </div>
        <table class="market">
            <TableHead cells/>
            <tbody>{body}</tbody>
        </table>
        <Pagination model=footer/>
    }
    .into_any()
}

/// Content of one cell
fn cell(asset: &MarketAsset, column: &str) -> AnyView {
    match column {
        "name" => {
            let image = (!asset.image.is_empty()).then(|| {
                view! {
                    <img src={asset.image.clone()} alt="" width="24" height="24" loading="lazy"/>
                }
            });
            view! {
                {image}
                <span class="name">{asset.name.clone()}</span>
                " "
                <span class="symbol">{asset.symbol.to_uppercase()}</span>
            }
            .into_any()
        }
        "price_change_percentage_24h" => {
            let class = match asset.price_change_percentage_24h {
                Some(change) if change > 0.0 => "positive",
                Some(change) if change < 0.0 => "negative",
                _ => "neutral",
            };
            view! { <span class=class>{cell_text(asset, column)}</span> }.into_any()
        }
        _ => cell_text(asset, column).into_any(),
    }
}

/// Display text of one cell
fn cell_text(asset: &MarketAsset, column: &str) -> String {
    match column {
        "rank" => asset
            .market_cap_rank
            .map_or_else(|| "N/A".to_string(), |rank| rank.to_string()),
        "current_price" => format_optional_currency(asset.current_price),
        "price_change_percentage_24h" => format_percent_change(asset.price_change_percentage_24h),
        "market_cap" => format_large_currency(asset.market_cap),
        "total_volume" => format_large_currency(asset.total_volume),
        "circulating_supply" => format_supply(asset.circulating_supply),
        "total_supply" => format_supply(asset.total_supply),
        "max_supply" => format_supply(asset.max_supply),
        "ath" => format_optional_currency(asset.ath),
        "atl" => format_optional_currency(asset.atl),
        "last_updated" => asset
            .last_updated
            .as_ref()
            .map_or_else(|| "N/A".to_string(), format_timestamp),
        _ => String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::html::render_html;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn bitcoin() -> MarketAsset {
        serde_json::from_value(serde_json::json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://img.example/btc.png",
            "current_price": 67234.5,
            "market_cap": 1_324_000_000_000.0_f64,
            "market_cap_rank": 1,
            "price_change_percentage_24h": 2.346,
            "total_volume": 35_120_000_000.0_f64,
            "circulating_supply": 19_700_000.0,
            "total_supply": 21_000_000.0,
            "max_supply": null,
            "ath": 73738.0,
            "atl": 67.81,
            "last_updated": "2024-05-01T12:30:00Z"
        }))
        .unwrap()
    }

    fn ready(assets: Vec<MarketAsset>) -> Loaded<Vec<MarketAsset>> {
        Loaded::Ready {
            data: Arc::new(assets),
            outdated: false,
        }
    }

    fn page(loaded: &Loaded<Vec<MarketAsset>>, state: &TableState) -> String {
        render(&Session::anonymous(), loaded, state, &TableConfig::default())
    }

    #[test]
    fn test_cells_are_formatted() {
        let asset = bitcoin();
        assert_eq!(cell_text(&asset, "rank"), "1");
        assert_eq!(cell_text(&asset, "current_price"), "$67,234.50");
        assert_eq!(cell_text(&asset, "market_cap"), "$1.32T");
        assert_eq!(cell_text(&asset, "total_volume"), "$35.12B");
        assert_eq!(cell_text(&asset, "price_change_percentage_24h"), "+2.35%");
        assert_eq!(cell_text(&asset, "max_supply"), "N/A");
        assert_eq!(cell_text(&asset, "total_supply"), "21.00M");
        assert_eq!(cell_text(&asset, "last_updated"), "2024-05-01 12:30:00 UTC");
    }

    #[test]
    fn test_name_and_change_cells_markup() {
        let asset = bitcoin();
        let name = render_html(|| cell(&asset, "name"));
        assert!(name.contains("<span class=\"symbol\">BTC</span>"));
        assert!(name.contains("src=\"https://img.example/btc.png\""));

        let change = render_html(|| cell(&asset, "price_change_percentage_24h"));
        assert_eq!(change, "<span class=\"positive\">+2.35%</span>");
    }

    #[test]
    fn test_rows_render() {
        let html = page(&ready(vec![bitcoin()]), &TableState::for_record::<MarketAsset>(10));
        assert!(html.contains("<span class=\"name\">Bitcoin</span>"));
        assert!(html.contains("Showing 1 of 1 cryptocurrencies"));
        assert!(!html.contains("No results found."));
    }

    #[test]
    fn test_empty_list_is_no_results_not_loading() {
        let html = page(&ready(Vec::new()), &TableState::for_record::<MarketAsset>(10));
        assert!(html.contains("No results found."));
        assert!(!html.contains("Loading cryptocurrency data..."));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_no_matches_is_distinct_from_no_data() {
        let mut state = TableState::for_record::<MarketAsset>(10);
        state.set_filter("dogecoin");
        let html = page(&ready(vec![bitcoin()]), &state);
        assert!(html.contains("No cryptocurrencies match your search."));
        assert!(!html.contains("No results found."));
        assert!(html.contains("value=\"dogecoin\""));
    }

    #[test]
    fn test_loading_and_failed_states() {
        let state = TableState::for_record::<MarketAsset>(10);
        let html = page(&Loaded::Loading, &state);
        assert!(html.contains("Loading cryptocurrency data..."));
        assert!(html.contains("http-equiv=\"refresh\""));

        let html = page(&Loaded::Failed, &state);
        assert!(html.contains("Failed to load market data."));
        assert!(html.contains("href=\"/dashboard?refresh=1\""));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_outdated_data_shows_notice() {
        let loaded = Loaded::Ready {
            data: Arc::new(vec![bitcoin()]),
            outdated: true,
        };
        let html = page(&loaded, &TableState::for_record::<MarketAsset>(10));
        assert!(html.contains("Could not refresh"));
        assert!(html.contains("Bitcoin"));
    }

    #[test]
    fn test_hidden_column_not_rendered() {
        let mut state = TableState::for_record::<MarketAsset>(10);
        state.set_column_visible("market_cap", false);
        let html = page(&ready(vec![bitcoin()]), &state);
        assert!(!html.contains("$1.32T"));
        assert!(html.contains("$35.12B"));
    }

    #[test]
    fn test_asset_text_is_escaped() {
        let mut asset = bitcoin();
        asset.name = "<script>x</script>".to_string();
        let html = page(&ready(vec![asset]), &TableState::for_record::<MarketAsset>(10));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>x"));
    }
}
