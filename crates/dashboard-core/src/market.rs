//! Market table columns

use crate::table::{CellValue, ColumnDef, SortSpec, TableRecord};
use crate::types::MarketAsset;
use smallvec::{SmallVec, smallvec};

static MARKET_COLUMNS: [ColumnDef; 12] = [
    ColumnDef::new("rank", "#"),
    ColumnDef::new("name", "Name").pinned(),
    ColumnDef::new("current_price", "Price"),
    ColumnDef::new("price_change_percentage_24h", "24h %"),
    ColumnDef::new("market_cap", "Market Cap"),
    ColumnDef::new("total_volume", "Volume (24h)"),
    ColumnDef::new("circulating_supply", "Circulating Supply").hidden_by_default(),
    ColumnDef::new("total_supply", "Total Supply"),
    ColumnDef::new("max_supply", "Max Supply"),
    ColumnDef::new("ath", "ATH"),
    ColumnDef::new("atl", "ATL"),
    ColumnDef::new("last_updated", "Last Updated"),
];

impl TableRecord for MarketAsset {
    fn columns() -> &'static [ColumnDef] {
        &MARKET_COLUMNS
    }

    fn cell(&self, column: &str) -> CellValue<'_> {
        match column {
            "rank" => CellValue::number(self.market_cap_rank.map(f64::from)),
            "name" => CellValue::Text(&self.name),
            "current_price" => CellValue::number(self.current_price),
            "price_change_percentage_24h" => CellValue::number(self.price_change_percentage_24h),
            "market_cap" => CellValue::number(self.market_cap),
            "total_volume" => CellValue::number(self.total_volume),
            "circulating_supply" => CellValue::number(self.circulating_supply),
            "total_supply" => CellValue::number(self.total_supply),
            "max_supply" => CellValue::number(self.max_supply),
            "ath" => CellValue::number(self.ath),
            "atl" => CellValue::number(self.atl),
            "last_updated" => self
                .last_updated
                .map_or(CellValue::Empty, CellValue::Timestamp),
            _ => CellValue::Empty,
        }
    }

    fn search_fields(&self) -> SmallVec<[&str; 2]> {
        smallvec![self.name.as_str(), self.symbol.as_str()]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("rank"))
    }
}
