//! In-memory record stores. Each one owns a `Vec` of records and exposes
//! add/update/query helpers plus the derived totals the views need; the
//! service layer is responsible for persisting after a mutation.

use std::collections::HashSet;

use chrono::Utc;
use thiserror::Error;

pub mod cart;
pub mod orders;
pub mod products;
pub mod rates;
pub mod shared;

pub use cart::Cart;
pub use orders::{OrderBook, OrderDraft};
pub use products::{Catalog, ProductDraft, ProductFilter, ProductPatch, ProductSort};
pub use shared::SharedData;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("quantity must be between 1 and {max}, got {0}", max = cart::MAX_LINE_QUANTITY)]
    InvalidQuantity(i64),

    #[error("weight must be greater than 0 and at most {max} kg", max = rates::MAX_WEIGHT_KG)]
    InvalidWeight,

    #[error("{0} is too large")]
    TotalOverflow(&'static str),
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// `<prefix>-<epoch millis>`, bumped forward until it does not collide.
pub(crate) fn next_id<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let taken: HashSet<&str> = existing.into_iter().collect();
    let mut stamp = Utc::now().timestamp_millis();
    loop {
        let id = format!("{prefix}-{stamp}");
        if !taken.contains(id.as_str()) {
            return id;
        }
        stamp += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::next_id;

    #[test]
    fn next_id_skips_taken_ids() {
        let first = next_id("ORD", []);
        let second = next_id("ORD", [first.as_str()]);
        assert!(first.starts_with("ORD-"));
        assert_ne!(first, second);
    }
}
