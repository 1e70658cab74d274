use super::{AlmondMilk, BaseCoffee, Enhancement, ExtraShot, OatMilk, Product, VanillaSyrup};
use rust_decimal::Decimal;

/// Which enhancements a customer picked for one drink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Customization {
    pub oat_milk: bool,
    pub almond_milk: bool,
    pub vanilla_syrup: bool,
    pub extra_shot: bool,
}

impl Customization {
    /// Collects the enhancements named by menu option values. Unknown keys are ignored.
    pub fn from_option_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .filter_map(|key| Enhancement::from_option_key(key.as_ref()))
            .fold(Self::default(), Self::with)
    }

    pub fn with(mut self, enhancement: Enhancement) -> Self {
        *self.flag_mut(enhancement) = true;
        self
    }

    pub fn contains(&self, enhancement: Enhancement) -> bool {
        match enhancement {
            Enhancement::OatMilk => self.oat_milk,
            Enhancement::AlmondMilk => self.almond_milk,
            Enhancement::VanillaSyrup => self.vanilla_syrup,
            Enhancement::ExtraShot => self.extra_shot,
        }
    }

    /// The selected enhancements in application order.
    pub fn enhancements(&self) -> Vec<Enhancement> {
        Enhancement::ALL
            .into_iter()
            .filter(|e| self.contains(*e))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.enhancements().is_empty()
    }

    fn flag_mut(&mut self, enhancement: Enhancement) -> &mut bool {
        match enhancement {
            Enhancement::OatMilk => &mut self.oat_milk,
            Enhancement::AlmondMilk => &mut self.almond_milk,
            Enhancement::VanillaSyrup => &mut self.vanilla_syrup,
            Enhancement::ExtraShot => &mut self.extra_shot,
        }
    }
}

/// Entry points for building decorated products without naming decorator types.
pub struct ProductCustomizer;

impl ProductCustomizer {
    pub fn base(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Box<dyn Product> {
        Box::new(BaseCoffee::new(name, description, price))
    }

    pub fn add_oat_milk(product: Box<dyn Product>) -> Box<dyn Product> {
        Box::new(OatMilk::new(product))
    }

    pub fn add_almond_milk(product: Box<dyn Product>) -> Box<dyn Product> {
        Box::new(AlmondMilk::new(product))
    }

    pub fn add_vanilla_syrup(product: Box<dyn Product>) -> Box<dyn Product> {
        Box::new(VanillaSyrup::new(product))
    }

    pub fn add_extra_shot(product: Box<dyn Product>) -> Box<dyn Product> {
        Box::new(ExtraShot::new(product))
    }

    /// Applies every selected enhancement, always in the order oat milk, almond milk,
    /// vanilla syrup, extra shot.
    pub fn customize(product: Box<dyn Product>, customization: &Customization) -> Box<dyn Product> {
        customization
            .enhancements()
            .into_iter()
            .fold(product, |product, enhancement| enhancement.apply(product))
    }
}
