//! `pricecalc-client`
//!
//! **Responsibility:** the state container a pricing UI owns.
//!
//! This crate provides:
//! - Local key-value persistence of the product list (save on every mutation)
//! - Export of the list and fee configuration (console log, clipboard JSON)
//! - The calculator session tying fees, pending input and products together
//!
//! Rendering, toasts and real clipboard access stay with the UI layer.

pub mod calculator;
pub mod clipboard;
pub mod config;
pub mod export;
pub mod persisted;
pub mod store;

pub use calculator::{Calculator, Notice, ProductRow};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::Settings;
pub use export::ExportSnapshot;
pub use persisted::PersistedProducts;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, StoreResult};

use anyhow::Context;

/// Initialise logging and open a file-backed calculator for `settings`.
pub fn bootstrap<C: Clipboard>(
    settings: Settings,
    clipboard: C,
) -> anyhow::Result<Calculator<FileStore, C>> {
    pricecalc_observability::init();

    let store = match &settings.data_dir {
        Some(dir) => FileStore::open(dir)
            .with_context(|| format!("failed to open product store at {}", dir.display()))?,
        None => FileStore::open_default()?,
    };

    let products = PersistedProducts::load(store, settings.storage_key);
    tracing::info!(
        count = products.list().len(),
        key = products.key(),
        "product list loaded"
    );

    Ok(Calculator::new(settings.fees, products, clipboard))
}
