//! Enhancement decorators.
//!
//! Every decorator has the same shape: own the wrapped product, forward each accessor,
//! append a fixed suffix or add a fixed delta. The `enhancement!` macro generates that shape so
//! the four wrappers only differ in their constants.

use super::Product;
use rust_decimal::Decimal;
use std::fmt;

macro_rules! enhancement {
    (
        $(#[$meta:meta])*
        $type:ident {
            name: $name_suffix:literal,
            description: $description_suffix:literal,
            cents: $cents:literal $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $type {
            inner: Box<dyn Product>,
        }

        impl $type {
            /// Wraps an already boxed product.
            pub fn new(inner: Box<dyn Product>) -> Self {
                Self { inner }
            }

            /// Wraps any product, boxing it.
            pub fn wrap(inner: impl Product + 'static) -> Self {
                Self::new(Box::new(inner))
            }

            /// The amount this decorator adds to the wrapped price.
            pub fn price_delta() -> Decimal {
                Decimal::new($cents, 2)
            }

            /// Gives back the wrapped product.
            pub fn into_inner(self) -> Box<dyn Product> {
                self.inner
            }
        }

        impl Product for $type {
            fn name(&self) -> String {
                format!("{}{}", self.inner.name(), $name_suffix)
            }

            fn description(&self) -> String {
                format!("{}{}", self.inner.description(), $description_suffix)
            }

            fn price(&self) -> Decimal {
                self.inner.price() + Self::price_delta()
            }
        }

        impl fmt::Debug for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($type))
                    .field("name", &self.name())
                    .field("price", &self.price())
                    .finish()
            }
        }
    };
}

enhancement! {
    /// Swaps dairy for oat milk.
    OatMilk {
        name: " with Oat Milk",
        description: ", oat milk",
        cents: 75,
    }
}

enhancement! {
    /// Swaps dairy for almond milk.
    AlmondMilk {
        name: " with Almond Milk",
        description: ", almond milk",
        cents: 75,
    }
}

enhancement! {
    /// A pump of vanilla syrup.
    VanillaSyrup {
        name: " with Vanilla",
        description: ", vanilla syrup",
        cents: 50,
    }
}

enhancement! {
    /// One additional espresso shot.
    ExtraShot {
        name: " with Extra Shot",
        description: ", extra espresso shot",
        cents: 100,
    }
}

/// The enhancements a menu option key can select.
///
/// Variants are declared in the order [`ProductCustomizer`](super::ProductCustomizer)
/// applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Enhancement {
    OatMilk,
    AlmondMilk,
    VanillaSyrup,
    ExtraShot,
}

impl Enhancement {
    /// All enhancements in application order.
    pub const ALL: [Enhancement; 4] = [
        Enhancement::OatMilk,
        Enhancement::AlmondMilk,
        Enhancement::VanillaSyrup,
        Enhancement::ExtraShot,
    ];

    /// Maps a menu option value (e.g. `"oat-milk"`) to its enhancement.
    pub fn from_option_key(key: &str) -> Option<Self> {
        match key {
            "oat-milk" => Some(Self::OatMilk),
            "almond-milk" => Some(Self::AlmondMilk),
            "vanilla" => Some(Self::VanillaSyrup),
            "extra-shot" => Some(Self::ExtraShot),
            _ => None,
        }
    }

    pub fn option_key(self) -> &'static str {
        match self {
            Self::OatMilk => "oat-milk",
            Self::AlmondMilk => "almond-milk",
            Self::VanillaSyrup => "vanilla",
            Self::ExtraShot => "extra-shot",
        }
    }

    pub fn price_delta(self) -> Decimal {
        match self {
            Self::OatMilk => OatMilk::price_delta(),
            Self::AlmondMilk => AlmondMilk::price_delta(),
            Self::VanillaSyrup => VanillaSyrup::price_delta(),
            Self::ExtraShot => ExtraShot::price_delta(),
        }
    }

    /// Wraps `product` in the matching decorator.
    pub fn apply(self, product: Box<dyn Product>) -> Box<dyn Product> {
        match self {
            Self::OatMilk => Box::new(OatMilk::new(product)),
            Self::AlmondMilk => Box::new(AlmondMilk::new(product)),
            Self::VanillaSyrup => Box::new(VanillaSyrup::new(product)),
            Self::ExtraShot => Box::new(ExtraShot::new(product)),
        }
    }
}

impl fmt::Display for Enhancement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::BaseCoffee;

    #[test]
    fn test_each_decorator_applies_its_constants() {
        let base = || -> Box<dyn Product> {
            Box::new(BaseCoffee::new("Mocha", "Chocolate", Decimal::new(450, 2)))
        };

        let almond = AlmondMilk::new(base());
        assert_eq!(almond.name(), "Mocha with Almond Milk");
        assert_eq!(almond.description(), "Chocolate, almond milk");
        assert_eq!(almond.price(), Decimal::new(525, 2));

        let vanilla = VanillaSyrup::new(base());
        assert_eq!(vanilla.name(), "Mocha with Vanilla");
        assert_eq!(vanilla.description(), "Chocolate, vanilla syrup");
        assert_eq!(vanilla.price(), Decimal::new(500, 2));
    }

    #[test]
    fn test_option_keys_round_trip() {
        for enhancement in Enhancement::ALL {
            assert_eq!(
                Enhancement::from_option_key(enhancement.option_key()),
                Some(enhancement)
            );
        }
        assert_eq!(Enhancement::from_option_key("whole-milk"), None);
    }

    #[test]
    fn test_apply_matches_concrete_decorator() {
        let base = Box::new(BaseCoffee::new("Latte", "", Decimal::new(400, 2)));
        let applied = Enhancement::ExtraShot.apply(base);

        assert_eq!(applied.name(), "Latte with Extra Shot");
        assert_eq!(
            applied.price(),
            Decimal::new(400, 2) + Enhancement::ExtraShot.price_delta()
        );
    }

    #[test]
    fn test_into_inner_unwraps_one_layer() {
        let drink = OatMilk::wrap(BaseCoffee::new("Latte", "", Decimal::new(400, 2)));
        assert_eq!(drink.into_inner().name(), "Latte");
    }
}
