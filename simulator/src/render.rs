//! Presentation adapter.
//!
//! The core returns values; rendering them is an external concern behind the
//! [`Renderer`] trait. The session invokes the callbacks in a fixed order per
//! run: busy on, log, outcome, busy off.

use crate::types::{LogRecord, Product, SimulationOutcome};

/// Callbacks through which a run's progress and result reach the user.
pub trait Renderer {
    /// A run started (`true`) or finished (`false`).
    ///
    /// While busy the caller must not start another run; a terminal renderer
    /// shows a loading indicator here.
    fn on_busy_state_change(&self, is_busy: bool);

    /// Display the run's audit record, pretty-printed.
    fn on_log(&self, log: &LogRecord);

    /// Display the run's result: the product list on success, an error
    /// message on failure.
    fn on_outcome(&self, outcome: &SimulationOutcome);
}

/// Renders to stdout for the interactive terminal session.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    /// One product card as a single line.
    fn format_product(product: &Product) -> String {
        format!(
            "  {} {} — ${:.2} ({} in stock)",
            product.icon, product.name, product.price, product.stock
        )
    }
}

impl Renderer for TerminalRenderer {
    fn on_busy_state_change(&self, is_busy: bool) {
        if is_busy {
            println!("Fetching products...");
        }
    }

    fn on_log(&self, log: &LogRecord) {
        println!("Request log:");
        println!("{}", log.pretty());
    }

    fn on_outcome(&self, outcome: &SimulationOutcome) {
        match outcome {
            SimulationOutcome::Success { products, .. } => {
                println!("Fetched {} products:", products.len());
                for product in products {
                    println!("{}", Self::format_product(product));
                }
            }
            SimulationOutcome::Failure { error, .. } => {
                println!("⚠ {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_card_format() {
        let product = Product {
            id: 3,
            name: "USB-C Cable",
            price: 12.99,
            stock: 150,
            icon: "🔌",
        };

        assert_eq!(
            TerminalRenderer::format_product(&product),
            "  🔌 USB-C Cable — $12.99 (150 in stock)"
        );
    }

    #[test]
    fn test_product_card_pads_price_to_two_decimals() {
        let product = Product {
            id: 9,
            name: "Sticker",
            price: 1.5,
            stock: 3,
            icon: "🏷",
        };

        assert!(TerminalRenderer::format_product(&product).contains("$1.50"));
    }
}
