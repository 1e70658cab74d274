use crate::model::FulfillmentOption;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Tax rate and flat fees applied at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPricing {
    /// Fraction of the subtotal, e.g. `0.0825` for 8.25%.
    pub tax_rate: Decimal,
    pub delivery_fee: Decimal,
    pub shipping_fee: Decimal,
}

impl Default for CheckoutPricing {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(825, 4),
            delivery_fee: Decimal::new(399, 2),
            shipping_fee: Decimal::new(599, 2),
        }
    }
}

/// The money breakdown shown before an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery_fee: Decimal,
    pub shipping_fee: Decimal,
    pub tip: Decimal,
    pub total: Decimal,
}

impl CheckoutPricing {
    /// Tax on `subtotal`, rounded half away from zero to cents.
    pub fn tax(&self, subtotal: Decimal) -> Decimal {
        (subtotal * self.tax_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Computes the breakdown. Only delivery carries a delivery fee and only shipping
    /// carries a shipping fee.
    pub fn quote(&self, subtotal: Decimal, fulfillment: FulfillmentOption, tip: Decimal) -> Quote {
        let tax = self.tax(subtotal);
        let delivery_fee = match fulfillment {
            FulfillmentOption::Delivery => self.delivery_fee,
            _ => Decimal::ZERO,
        };
        let shipping_fee = match fulfillment {
            FulfillmentOption::Shipping => self.shipping_fee,
            _ => Decimal::ZERO,
        };

        Quote {
            subtotal,
            tax,
            delivery_fee,
            shipping_fee,
            tip,
            total: subtotal + tax + delivery_fee + shipping_fee + tip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_quote_has_no_fees() {
        let quote = CheckoutPricing::default().quote(
            Decimal::new(1000, 2),
            FulfillmentOption::Pickup,
            Decimal::ONE,
        );

        assert_eq!(quote.tax, Decimal::new(83, 2));
        assert_eq!(quote.delivery_fee, Decimal::ZERO);
        assert_eq!(quote.shipping_fee, Decimal::ZERO);
        assert_eq!(quote.total, Decimal::new(1183, 2));
    }

    #[test]
    fn test_delivery_and_shipping_fees() {
        let pricing = CheckoutPricing::default();
        let subtotal = Decimal::new(2000, 2);

        let delivery = pricing.quote(subtotal, FulfillmentOption::Delivery, Decimal::ZERO);
        assert_eq!(delivery.delivery_fee, Decimal::new(399, 2));
        assert_eq!(delivery.total, Decimal::new(2564, 2));

        let shipping = pricing.quote(subtotal, FulfillmentOption::Shipping, Decimal::ZERO);
        assert_eq!(shipping.shipping_fee, Decimal::new(599, 2));
        assert_eq!(shipping.delivery_fee, Decimal::ZERO);
        assert_eq!(shipping.total, Decimal::new(2764, 2));
    }

    #[test]
    fn test_tax_rounds_half_up() {
        let pricing = CheckoutPricing {
            tax_rate: Decimal::new(5, 2),
            ..CheckoutPricing::default()
        };
        // 0.50 * 0.05 = 0.025
        assert_eq!(pricing.tax(Decimal::new(50, 2)), Decimal::new(3, 2));
    }
}
