//! Product list domain module.
//!
//! An ordered collection of products (id, title, price). Insertion order is
//! display order is storage order. Pure state only: persistence lives in the
//! client crate, which saves after each mutation made here.

pub mod list;
pub mod product;

pub use list::ProductList;
pub use product::{DEFAULT_PRICE, MAX_TITLE_CHARS, Product, ProductField};
