//! Static product catalog.
//!
//! Read-only reference data returned by every successful run. The catalog is
//! never mutated and requires no locking.

use crate::constants::CATALOG_SIZE;
use crate::types::Product;

/// The full product catalog.
const CATALOG: [Product; CATALOG_SIZE] = [
    Product {
        id: 1,
        name: "Wireless Headphones",
        price: 79.99,
        stock: 45,
        icon: "🎧",
    },
    Product {
        id: 2,
        name: "Smart Watch",
        price: 199.99,
        stock: 23,
        icon: "⌚",
    },
    Product {
        id: 3,
        name: "USB-C Cable",
        price: 12.99,
        stock: 150,
        icon: "🔌",
    },
    Product {
        id: 4,
        name: "Laptop Stand",
        price: 49.99,
        stock: 67,
        icon: "💻",
    },
    Product {
        id: 5,
        name: "Mechanical Keyboard",
        price: 129.99,
        stock: 34,
        icon: "⌨️",
    },
    Product {
        id: 6,
        name: "Webcam HD",
        price: 89.99,
        stock: 18,
        icon: "📷",
    },
];

/// All catalog entries, in display order.
#[must_use]
pub const fn products() -> &'static [Product] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_six_products() {
        assert_eq!(products().len(), CATALOG_SIZE);
        assert_eq!(products().len(), 6);
    }

    #[test]
    fn test_catalog_ids_are_contiguous_from_one() {
        for (expected_id, product) in (1..=6u32).zip(products()) {
            assert_eq!(product.id, expected_id);
        }
    }

    #[test]
    fn test_catalog_values_are_non_negative() {
        for product in products() {
            assert!(product.price >= 0.0, "price of {}", product.name);
            assert!(!product.name.is_empty());
            assert!(!product.icon.is_empty());
        }
    }
}
