//! # Pricing
//!
//! Composes a base drink with additive enhancements.
//!
//! ## Overview
//!
//! Everything priced implements [`Product`]. A [`BaseCoffee`] carries the name,
//! description and price it was built with. Each decorator in [`decorators`] owns the
//! product it wraps and, on every accessor, forwards to it and then applies a fixed
//! change:
//!
//! | Decorator | Name suffix | Description suffix | Price |
//! |-----------|-------------|--------------------|-------|
//! | [`OatMilk`] | ` with Oat Milk` | `, oat milk` | +0.75 |
//! | [`AlmondMilk`] | ` with Almond Milk` | `, almond milk` | +0.75 |
//! | [`VanillaSyrup`] | ` with Vanilla` | `, vanilla syrup` | +0.50 |
//! | [`ExtraShot`] | ` with Extra Shot` | `, extra espresso shot` | +1.00 |
//!
//! The final price does not depend on the order decorators were applied in. The name
//! and description do: suffixes appear in application order.
//!
//! ## Structure
//!
//! - [`decorators`] - The four enhancement wrappers and [`Enhancement`]
//! - [`customizer`] - [`ProductCustomizer`] and [`Customization`] helpers
//!
//! ## Usage
//!
//! ```rust
//! use coffee_shop::pricing::{BaseCoffee, ExtraShot, OatMilk, Product};
//! use rust_decimal::Decimal;
//!
//! let latte = BaseCoffee::new("Latte", "Espresso with steamed milk", Decimal::new(400, 2));
//! let drink = ExtraShot::wrap(OatMilk::wrap(latte));
//!
//! assert_eq!(drink.name(), "Latte with Oat Milk with Extra Shot");
//! assert_eq!(drink.price(), Decimal::new(575, 2));
//! ```

pub mod customizer;
pub mod decorators;

pub use customizer::*;
pub use decorators::*;

use rust_decimal::Decimal;

/// The capability set every priced product exposes.
///
/// Decorators accept anything implementing this trait, including other decorators.
pub trait Product: Send + Sync {
    fn name(&self) -> String;
    fn description(&self) -> String;
    fn price(&self) -> Decimal;
}

impl<P: Product + ?Sized> Product for Box<P> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn description(&self) -> String {
        (**self).description()
    }

    fn price(&self) -> Decimal {
        (**self).price()
    }
}

/// An undecorated drink.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseCoffee {
    name: String,
    description: String,
    price: Decimal,
}

impl BaseCoffee {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

impl Product for BaseCoffee {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn price(&self) -> Decimal {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latte() -> BaseCoffee {
        BaseCoffee::new("Latte", "Espresso with steamed milk", Decimal::new(400, 2))
    }

    #[test]
    fn test_base_is_returned_as_given() {
        let base = latte();
        assert_eq!(base.name(), "Latte");
        assert_eq!(base.description(), "Espresso with steamed milk");
        assert_eq!(base.price(), Decimal::new(400, 2));
    }

    #[test]
    fn test_price_is_order_independent() {
        let a = ExtraShot::wrap(OatMilk::wrap(latte()));
        let b = OatMilk::wrap(ExtraShot::wrap(latte()));

        assert_eq!(a.price(), Decimal::new(575, 2));
        assert_eq!(a.price(), b.price());
    }

    #[test]
    fn test_name_follows_application_order() {
        let a = ExtraShot::wrap(OatMilk::wrap(latte()));
        let b = OatMilk::wrap(ExtraShot::wrap(latte()));

        assert_eq!(a.name(), "Latte with Oat Milk with Extra Shot");
        assert_eq!(b.name(), "Latte with Extra Shot with Oat Milk");
        assert_eq!(
            a.description(),
            "Espresso with steamed milk, oat milk, extra espresso shot"
        );
    }

    #[test]
    fn test_boxed_products_stack() {
        let mut drink: Box<dyn Product> = Box::new(latte());
        for _ in 0..3 {
            drink = Box::new(VanillaSyrup::wrap(drink));
        }

        assert_eq!(drink.price(), Decimal::new(550, 2));
        assert_eq!(drink.name(), "Latte with Vanilla with Vanilla with Vanilla");
    }
}
