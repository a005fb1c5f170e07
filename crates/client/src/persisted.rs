//! Product list bound to a storage key.

use pricecalc_products::{Product, ProductField, ProductList};

use crate::store::{KeyValueStore, StoreResult};

/// A [`ProductList`] that writes itself back to storage after each mutation.
///
/// Loaded once at startup. A missing, unreadable or malformed entry yields an
/// empty list; nothing about that is surfaced to the user. Mutations that turn
/// out to be no-ops (stale index) skip the save.
#[derive(Debug)]
pub struct PersistedProducts<S> {
    store: S,
    key: String,
    list: ProductList,
}

impl<S: KeyValueStore> PersistedProducts<S> {
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let list = read_list(&store, &key);
        Self { store, key, list }
    }

    pub fn save(&mut self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.list)?;
        self.store.set(&self.key, payload)?;
        tracing::debug!(key = %self.key, count = self.list.len(), "product list saved");
        Ok(())
    }

    pub fn list(&self) -> &ProductList {
        &self.list
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn add(&mut self, title: impl Into<String>) -> StoreResult<Product> {
        let product = self.list.add(title).clone();
        self.save()?;
        Ok(product)
    }

    pub fn update_field(&mut self, index: usize, field: ProductField) -> StoreResult<bool> {
        if !self.list.update_field(index, field) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn remove_at(&mut self, index: usize) -> StoreResult<Option<Product>> {
        let Some(removed) = self.list.remove_at(index) else {
            return Ok(None);
        };
        self.save()?;
        Ok(Some(removed))
    }
}

fn read_list<S: KeyValueStore>(store: &S, key: &str) -> ProductList {
    let text = match store.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => return ProductList::new(),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read stored products; starting empty");
            return ProductList::new();
        }
    };

    match serde_json::from_str::<Vec<Product>>(&text) {
        Ok(products) => ProductList::from_products(products),
        Err(err) => {
            tracing::warn!(key, error = %err, "stored products are malformed; starting empty");
            ProductList::new()
        }
    }
}
