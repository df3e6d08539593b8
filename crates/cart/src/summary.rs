//! Read-side view of the cart for display.

use serde::Serialize;

use crate::cart::Cart;

/// Formats a whole-unit price with two decimals, e.g. `₹1300.00`.
pub fn format_price(amount: u64, currency_symbol: &str) -> String {
    format!("{currency_symbol}{amount}.00")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub outfit_count: usize,
    pub grand_total: u64,
}

impl CartSummary {
    pub fn of(cart: &Cart) -> Self {
        Self {
            outfit_count: cart.len(),
            grand_total: cart.grand_total(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outfit_count == 0
    }

    /// `Cart (1 outfit)` / `Cart (3 outfits)`.
    pub fn heading(&self) -> String {
        let noun = if self.outfit_count == 1 { "outfit" } else { "outfits" };
        format!("Cart ({} {noun})", self.outfit_count)
    }

    /// `Total: ₹1300.00`.
    pub fn total_line(&self, currency_symbol: &str) -> String {
        format!("Total: {}", format_price(self.grand_total, currency_symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_has_two_decimals() {
        assert_eq!(format_price(1300, "₹"), "₹1300.00");
        assert_eq!(format_price(0, "$"), "$0.00");
    }

    #[test]
    fn heading_pluralizes() {
        let one = CartSummary {
            outfit_count: 1,
            grand_total: 500,
        };
        let many = CartSummary {
            outfit_count: 3,
            grand_total: 500,
        };
        assert_eq!(one.heading(), "Cart (1 outfit)");
        assert_eq!(many.heading(), "Cart (3 outfits)");
    }

    #[test]
    fn total_line_uses_symbol() {
        let summary = CartSummary {
            outfit_count: 2,
            grand_total: 4800,
        };
        assert_eq!(summary.total_line("₹"), "Total: ₹4800.00");
    }
}
