//! Calculator session: fees, pending input and the persisted product list.

use core::fmt;

use anyhow::Context;
use chrono::NaiveDate;

use pricecalc_core::{DomainResult, Entity, ProductId};
use pricecalc_pricing::{FeeConfig, ProfitDisplay};
use pricecalc_products::{ProductField, ProductList};

use crate::clipboard::Clipboard;
use crate::export::{ExportSnapshot, products_json};
use crate::persisted::PersistedProducts;
use crate::store::{KeyValueStore, StoreResult};

/// User-facing outcome of an action, rendered by the UI as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ProductAdded(String),
    ProductRemoved(String),
    ProductsLogged,
    JsonCopied,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ProductAdded(title) => write!(f, "{title} added."),
            Notice::ProductRemoved(title) => write!(f, "{title} removed."),
            Notice::ProductsLogged => f.write_str("Products logged to console."),
            Notice::JsonCopied => f.write_str("JSON copied to clipboard."),
        }
    }
}

/// One rendered row of the product table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub index: usize,
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub profit: ProfitDisplay,
}

/// Explicit state container for one calculator screen.
///
/// Outputs are pulled: [`Calculator::rows`] recomputes every profit from the
/// current fees and products, so there is no cached derived state to go stale.
pub struct Calculator<S, C> {
    fees: FeeConfig,
    pending_title: String,
    products: PersistedProducts<S>,
    clipboard: C,
}

impl<S: KeyValueStore, C: Clipboard> Calculator<S, C> {
    pub fn new(fees: FeeConfig, products: PersistedProducts<S>, clipboard: C) -> Self {
        Self {
            fees,
            pending_title: String::new(),
            products,
            clipboard,
        }
    }

    pub fn fees(&self) -> &FeeConfig {
        &self.fees
    }

    pub fn set_fee_percent(&mut self, value: f64) -> DomainResult<()> {
        self.fees.set_fee_percent(value)?;
        tracing::debug!(fee_percent = value, "fee percent changed");
        Ok(())
    }

    pub fn set_fee_constant(&mut self, value: f64) -> DomainResult<()> {
        self.fees.set_fee_constant(value)?;
        tracing::debug!(fee_constant = value, "fee constant changed");
        Ok(())
    }

    pub fn set_tax_percent(&mut self, value: f64) -> DomainResult<()> {
        self.fees.set_tax_percent(value)?;
        tracing::debug!(tax_percent = value, "tax percent changed");
        Ok(())
    }

    pub fn pending_title(&self) -> &str {
        &self.pending_title
    }

    pub fn set_pending_title(&mut self, title: impl Into<String>) {
        self.pending_title = title.into();
    }

    /// Add a product from the pending title and clear the input.
    ///
    /// An empty pending title is ignored. The insert and the reset happen
    /// together and produce a single save.
    pub fn submit_product(&mut self) -> StoreResult<Option<Notice>> {
        if self.pending_title.is_empty() {
            return Ok(None);
        }

        let title = std::mem::take(&mut self.pending_title);
        let product = self.products.add(title)?;
        tracing::info!(id = %product.id(), title = product.title(), "product added");
        Ok(Some(Notice::ProductAdded(product.title().to_string())))
    }

    pub fn update_title(&mut self, index: usize, title: impl Into<String>) -> StoreResult<bool> {
        self.products
            .update_field(index, ProductField::Title(title.into()))
    }

    pub fn update_price(&mut self, index: usize, price: f64) -> StoreResult<bool> {
        self.products.update_field(index, ProductField::Price(price))
    }

    pub fn remove(&mut self, index: usize) -> StoreResult<Option<Notice>> {
        let removed = self.products.remove_at(index)?;
        Ok(removed.map(|product| {
            tracing::info!(id = %product.id(), title = product.title(), "product removed");
            Notice::ProductRemoved(product.title().to_string())
        }))
    }

    pub fn products(&self) -> &ProductList {
        self.products.list()
    }

    pub fn rows(&self) -> Vec<ProductRow> {
        self.products
            .list()
            .iter()
            .enumerate()
            .map(|(index, product)| ProductRow {
                index,
                id: product.id().clone(),
                title: product.title().to_string(),
                price: product.price(),
                profit: ProfitDisplay::for_price(product.price(), &self.fees),
            })
            .collect()
    }

    pub fn snapshot(&self, date: NaiveDate) -> ExportSnapshot {
        ExportSnapshot::new(&self.fees, self.products.list(), date)
    }

    /// Write the full snapshot to the log (the developer console channel).
    pub fn log_products(&self) -> anyhow::Result<Notice> {
        let snapshot = ExportSnapshot::today(&self.fees, self.products.list());
        let json = serde_json::to_string(&snapshot).context("failed to serialize export snapshot")?;
        tracing::info!(target: "pricecalc::export", snapshot = %json, "products exported");
        Ok(Notice::ProductsLogged)
    }

    /// Copy the product array as compact JSON to the clipboard.
    pub fn copy_json(&mut self) -> anyhow::Result<Notice> {
        let json = products_json(self.products.list()).context("failed to serialize products")?;
        self.clipboard
            .write_text(&json)
            .context("failed to write products to clipboard")?;
        Ok(Notice::JsonCopied)
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::store::MemoryStore;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    fn calculator() -> Calculator<MemoryStore, MemoryClipboard> {
        Calculator::new(
            FeeConfig::default(),
            PersistedProducts::load(MemoryStore::new(), "product"),
            MemoryClipboard::default(),
        )
    }

    #[test]
    fn submit_adds_product_and_clears_pending_title() {
        let mut calc = calculator();
        calc.set_pending_title("Widget");

        let notice = calc.submit_product().unwrap();

        assert_eq!(notice, Some(Notice::ProductAdded("Widget".to_string())));
        assert_eq!(calc.pending_title(), "");
        assert_eq!(calc.products().len(), 1);
    }

    #[test]
    fn submit_with_empty_title_is_ignored() {
        let mut calc = calculator();
        assert_eq!(calc.submit_product().unwrap(), None);
        assert!(calc.products().is_empty());
    }

    #[test]
    fn rows_recompute_when_fees_change() {
        let mut calc = calculator();
        calc.set_pending_title("Widget");
        calc.submit_product().unwrap();
        calc.update_price(0, 100.0).unwrap();

        assert_eq!(calc.rows()[0].profit.to_string(), "97.30");

        calc.set_tax_percent(7.5).unwrap();
        assert_eq!(calc.rows()[0].profit.to_string(), "104.61");
    }

    #[test]
    fn zero_price_row_shows_placeholder() {
        let mut calc = calculator();
        calc.set_pending_title("Free");
        calc.submit_product().unwrap();
        calc.update_price(0, 0.0).unwrap();

        assert_eq!(calc.rows()[0].profit, ProfitDisplay::Placeholder);
    }

    #[test]
    fn invalid_fee_is_rejected_and_previous_kept() {
        let mut calc = calculator();
        assert!(calc.set_fee_percent(9.0).is_err());
        assert_eq!(calc.fees().fee_percent(), 2.6);
    }

    #[test]
    fn remove_reports_title() {
        let mut calc = calculator();
        calc.set_pending_title("Widget");
        calc.submit_product().unwrap();

        assert_eq!(
            calc.remove(0).unwrap(),
            Some(Notice::ProductRemoved("Widget".to_string()))
        );
        assert_eq!(calc.remove(0).unwrap(), None);
    }

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn log_products_emits_full_snapshot() {
        let mut calc = calculator();
        calc.set_tax_percent(7.5).unwrap();
        calc.set_pending_title("Widget");
        calc.submit_product().unwrap();

        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_max_level(tracing::Level::INFO)
            .json()
            .finish();
        let notice = tracing::subscriber::with_default(subscriber, || calc.log_products()).unwrap();
        assert_eq!(notice, Notice::ProductsLogged);

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        let event = output
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .find(|event| event["target"] == "pricecalc::export")
            .expect("export event logged");

        let snapshot: serde_json::Value =
            serde_json::from_str(event["fields"]["snapshot"].as_str().unwrap()).unwrap();
        assert_eq!(snapshot["transactionFeePercent"], 2.6);
        assert_eq!(snapshot["transactionFeeConstant"], 0.1);
        assert_eq!(snapshot["taxPercent"], 7.5);
        assert_eq!(snapshot["products"][0]["title"], "Widget");
        assert_eq!(snapshot["products"][0]["price"], 9.99);
        assert_eq!(snapshot["date"].as_str().unwrap().len(), 10);
    }

    #[test]
    fn notices_match_toast_text() {
        assert_eq!(Notice::ProductAdded("Widget".into()).to_string(), "Widget added.");
        assert_eq!(Notice::ProductRemoved("Widget".into()).to_string(), "Widget removed.");
        assert_eq!(Notice::ProductsLogged.to_string(), "Products logged to console.");
        assert_eq!(Notice::JsonCopied.to_string(), "JSON copied to clipboard.");
    }
}
