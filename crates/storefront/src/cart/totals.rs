//! Subtotal, promo discount and total.

use la_reyna_core::Price;

use super::Cart;

/// The one promo code the shop accepts.
pub const PROMO_CODE: &str = "PROMO10";

/// Flat discount granted by [`PROMO_CODE`], in soles.
const PROMO_DISCOUNT_SOLES: i64 = 10;

/// Discount for a promo code.
///
/// Case-insensitive but otherwise exact: surrounding spaces make the code
/// invalid. Anything else yields zero.
#[must_use]
pub fn promo_discount(code: &str) -> Price {
    if code.eq_ignore_ascii_case(PROMO_CODE) {
        Price::from_soles(PROMO_DISCOUNT_SOLES)
    } else {
        Price::ZERO
    }
}

/// Cart totals as shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Price,
    pub discount: Price,
    pub total: Price,
}

impl Totals {
    /// Totals with a given discount. `total` is not clamped at zero.
    #[must_use]
    pub fn new(cart: &Cart, discount: Price) -> Self {
        let subtotal = cart.subtotal();
        Self {
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }

    /// Totals without any discount.
    #[must_use]
    pub fn undiscounted(cart: &Cart) -> Self {
        Self::new(cart, Price::ZERO)
    }

    /// Totals after applying `code`.
    #[must_use]
    pub fn with_promo(cart: &Cart, code: &str) -> Self {
        Self::new(cart, promo_discount(code))
    }

    /// Whether a discount is in effect.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartLineItem;

    fn cart(lines: &[(i64, u32)]) -> Cart {
        let items = lines
            .iter()
            .enumerate()
            .map(|(i, &(soles, qty))| {
                CartLineItem::new("", format!("item-{i}"), None, Price::from_soles(soles), qty)
                    .unwrap()
            })
            .collect::<Vec<_>>();
        Cart::from(items)
    }

    #[test]
    fn test_promo_code_matching() {
        assert_eq!(promo_discount("PROMO10"), Price::from_soles(10));
        assert_eq!(promo_discount("promo10"), Price::from_soles(10));
        assert_eq!(promo_discount("Promo10"), Price::from_soles(10));
        assert_eq!(promo_discount(" PROMO10"), Price::ZERO);
        assert_eq!(promo_discount("PROMO20"), Price::ZERO);
        assert_eq!(promo_discount(""), Price::ZERO);
    }

    #[test]
    fn test_worked_example() {
        let cart = cart(&[(50, 2), (30, 1)]);

        let plain = Totals::undiscounted(&cart);
        assert_eq!(plain.subtotal, Price::from_soles(130));
        assert_eq!(plain.total, Price::from_soles(130));
        assert!(!plain.has_discount());

        let promo = Totals::with_promo(&cart, "PROMO10");
        assert_eq!(promo.discount, Price::from_soles(10));
        assert_eq!(promo.total, Price::from_soles(120));
    }

    #[test]
    fn test_invalid_code_resets_discount() {
        let cart = cart(&[(50, 2), (30, 1)]);
        let totals = Totals::with_promo(&cart, "NOPE");
        assert_eq!(totals.discount, Price::ZERO);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_total_not_clamped() {
        let cart = cart(&[(4, 1)]);
        let totals = Totals::with_promo(&cart, "PROMO10");
        assert_eq!(totals.total, Price::from_soles(-6));
    }

    #[test]
    fn test_empty_cart() {
        let totals = Totals::undiscounted(&Cart::new());
        assert_eq!(totals.subtotal, Price::ZERO);
        assert_eq!(totals.total, Price::ZERO);
    }
}
