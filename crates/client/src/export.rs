//! Export shapes for the console log and clipboard channels.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use pricecalc_pricing::FeeConfig;
use pricecalc_products::{Product, ProductList};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Full state dump: fee configuration, products and the export date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub transaction_fee_percent: f64,
    pub transaction_fee_constant: f64,
    pub tax_percent: f64,
    pub products: Vec<Product>,
    pub date: String,
}

impl ExportSnapshot {
    pub fn new(fees: &FeeConfig, products: &ProductList, date: NaiveDate) -> Self {
        Self {
            transaction_fee_percent: fees.fee_percent(),
            transaction_fee_constant: fees.fee_constant(),
            tax_percent: fees.tax_percent(),
            products: products.to_exportable(),
            date: date.format(DATE_FORMAT).to_string(),
        }
    }

    /// Snapshot stamped with today's local date.
    pub fn today(fees: &FeeConfig, products: &ProductList) -> Self {
        Self::new(fees, products, Local::now().date_naive())
    }
}

/// Compact JSON of just the product array (clipboard channel).
pub fn products_json(products: &ProductList) -> serde_json::Result<String> {
    serde_json::to_string(&products.to_exportable())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_uses_camel_case_fields_and_iso_date() {
        let mut list = ProductList::new();
        list.add("Widget");
        let fees = FeeConfig::new(2.6, 0.1, 7.5).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let json = serde_json::to_value(ExportSnapshot::new(&fees, &list, date)).unwrap();

        assert_eq!(json["transactionFeePercent"], 2.6);
        assert_eq!(json["transactionFeeConstant"], 0.1);
        assert_eq!(json["taxPercent"], 7.5);
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["products"][0]["title"], "Widget");
        assert_eq!(json["products"][0]["price"], 9.99);
    }

    #[test]
    fn products_json_is_compact_array() {
        let mut list = ProductList::new();
        list.add("A");
        let text = products_json(&list).unwrap();
        assert!(text.starts_with("[{\"id\":"));
        assert!(!text.contains('\n'));
        assert!(!text.contains(": "));
    }

    #[test]
    fn today_has_iso_shape() {
        let snapshot = ExportSnapshot::today(&FeeConfig::default(), &ProductList::new());
        assert!(NaiveDate::parse_from_str(&snapshot.date, DATE_FORMAT).is_ok());
        assert_eq!(snapshot.date.len(), 10);
    }
}
