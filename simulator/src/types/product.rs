//! Product reference data.

use serde::Serialize;

/// One entry of the static product catalog.
///
/// Catalog entries are read-only reference data: they are never created or
/// mutated at runtime, so the textual fields borrow from the binary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Product {
    /// Catalog identifier, unique and contiguous from 1.
    pub id: u32,
    /// Display name.
    pub name: &'static str,
    /// Unit price in dollars. Non-negative.
    pub price: f64,
    /// Units in stock. Non-negative.
    pub stock: u32,
    /// Pictogram shown on the product card.
    pub icon: &'static str,
}
