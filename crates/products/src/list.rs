use std::collections::HashSet;

use serde::Serialize;

use pricecalc_core::{Entity, ProductId};

use crate::product::{DEFAULT_PRICE, Product, ProductField};

/// Ordered product collection.
///
/// Ids are unique for the lifetime of the list. Index-based operations ignore
/// out-of-range indices instead of panicking; the UI only ever passes indices
/// it just rendered, so a miss means a stale event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProductList {
    products: Vec<Product>,
}

impl ProductList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from rehydrated products, repairing blank and duplicate ids.
    ///
    /// The first occurrence of an id keeps it; blank ids and later duplicates
    /// get fresh ids.
    pub fn from_products(mut products: Vec<Product>) -> Self {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &mut products {
            let blank = product.id().as_str().trim().is_empty();
            if blank || seen.contains(product.id()) {
                let fresh = fresh_id(|id| seen.contains(id));
                tracing::warn!(stored = %product.id(), replacement = %fresh, "unusable product id in stored list");
                product.set_id(fresh);
            }
            seen.insert(product.id().clone());
        }
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    pub fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id() == id)
    }

    /// Append a product with a fresh id and the default price.
    pub fn add(&mut self, title: impl Into<String>) -> &Product {
        let id = fresh_id(|id| self.position(id).is_some());
        let index = self.products.len();
        self.products.push(Product::new(id, title, DEFAULT_PRICE));
        &self.products[index]
    }

    /// Replace one field of the product at `index`.
    ///
    /// Returns `false` (and changes nothing) when `index` is out of range.
    pub fn update_field(&mut self, index: usize, field: ProductField) -> bool {
        match self.products.get_mut(index) {
            Some(product) => {
                product.apply(field);
                true
            }
            None => {
                tracing::debug!(index, len = self.products.len(), "update ignored: index out of range");
                false
            }
        }
    }

    /// Remove the product at `index`, shifting later products left.
    pub fn remove_at(&mut self, index: usize) -> Option<Product> {
        if index >= self.products.len() {
            tracing::debug!(index, len = self.products.len(), "remove ignored: index out of range");
            return None;
        }
        Some(self.products.remove(index))
    }

    /// Plain `{id, title, price}` records for export.
    pub fn to_exportable(&self) -> Vec<Product> {
        self.products.clone()
    }
}

fn fresh_id(taken: impl Fn(&ProductId) -> bool) -> ProductId {
    loop {
        let id = ProductId::new();
        if !taken(&id) {
            return id;
        }
    }
}
