//! Turning a customer's choices into a cart line.

use super::MenuError;
use crate::model::{CartLineItem, MenuItem, MenuOption};
use crate::pricing::{BaseCoffee, Customization, Enhancement, Product, ProductCustomizer};
use rust_decimal::Decimal;
use tracing::debug;

/// A size, a set of options and a quantity chosen for one [`MenuItem`].
///
/// Options that map to an [`Enhancement`] are priced through the decorator chain, which
/// also appends their suffix to the line's name. Any other option adds its own price
/// delta, if it has one. Option values the menu item does not offer are ignored.
///
/// ```rust
/// use coffee_shop::menu::{LineItemSelection, MenuItemRegistry};
/// use rust_decimal::Decimal;
///
/// let registry = MenuItemRegistry::with_defaults();
/// let latte = registry
///     .get_factory("latte")?
///     .create_menu_item("latte-1", "Latte", "Espresso with steamed milk", "");
///
/// let line = LineItemSelection::new(&latte)
///     .size("medium")
///     .option("oat-milk")
///     .quantity(2)
///     .into_line_item()?;
///
/// assert_eq!(line.id, "latte-1-medium-oat-milk");
/// assert_eq!(line.name, "Latte with Oat Milk");
/// assert_eq!(line.price, Decimal::new(575, 2));
/// # Ok::<(), coffee_shop::menu::MenuError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LineItemSelection<'a> {
    menu_item: &'a MenuItem,
    size: Option<String>,
    options: Vec<String>,
    quantity: u32,
}

impl<'a> LineItemSelection<'a> {
    /// Starts a selection of one unit with no size and no options.
    pub fn new(menu_item: &'a MenuItem) -> Self {
        Self {
            menu_item,
            size: None,
            options: Vec::new(),
            quantity: 1,
        }
    }

    pub fn size(mut self, value: impl Into<String>) -> Self {
        self.size = Some(value.into());
        self
    }

    /// Adds an option value. Choosing the same value twice keeps one.
    pub fn option(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        if !self.options.contains(&value) {
            self.options.push(value);
        }
        self
    }

    pub fn options<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().fold(self, |sel, value| sel.option(value))
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Prices the selection and builds the cart line.
    ///
    /// # Errors
    /// - [`MenuError::InvalidQuantity`] if the quantity is zero
    /// - [`MenuError::MissingSize`] if the item offers sizes and none was chosen
    pub fn into_line_item(self) -> Result<CartLineItem, MenuError> {
        let item = self.menu_item;
        if self.quantity == 0 {
            return Err(MenuError::InvalidQuantity(self.quantity));
        }

        let size_value = self.size.unwrap_or_default();
        if item.has_sizes() && size_value.is_empty() {
            return Err(MenuError::MissingSize(item.name.clone()));
        }

        // An unmatched size falls back to the starting price with no label.
        let (base_price, size_label) = match item.size(&size_value) {
            Some(size) => (size.price, size.label.clone()),
            None => (item.price_min, String::new()),
        };

        let chosen: Vec<&MenuOption> = self
            .options
            .iter()
            .filter_map(|value| item.option(value))
            .collect();

        let customization = Customization::from_option_keys(chosen.iter().map(|o| &o.value));
        let surcharge: Decimal = chosen
            .iter()
            .filter(|o| Enhancement::from_option_key(&o.value).is_none())
            .filter_map(|o| o.price)
            .sum();

        let base = BaseCoffee::new(item.name.clone(), item.description.clone(), base_price);
        let product = ProductCustomizer::customize(Box::new(base), &customization);

        let option_values: Vec<&str> = chosen.iter().map(|o| o.value.as_str()).collect();
        let line = CartLineItem {
            id: CartLineItem::identity_key(&item.id, &size_value, &option_values),
            name: product.name(),
            price: product.price() + surcharge,
            image: item.image.clone(),
            quantity: self.quantity,
            size: size_label,
            options: chosen.iter().map(|o| o.label.clone()).collect(),
        };

        debug!(id = %line.id, price = %line.price, quantity = line.quantity, "Built cart line");
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{CoffeeFactory, ColdDrinkFactory, LatteFactory, MenuItemFactory};

    fn latte() -> MenuItem {
        LatteFactory.create_menu_item("latte-1", "Latte", "Espresso with steamed milk", "/latte.svg")
    }

    #[test]
    fn test_size_price_and_label() {
        let line = LineItemSelection::new(&latte())
            .size("large")
            .into_line_item()
            .unwrap();

        assert_eq!(line.id, "latte-1-large-");
        assert_eq!(line.price, Decimal::new(550, 2));
        assert_eq!(line.size, "Large (20oz)");
        assert_eq!(line.image, "/latte.svg");
        assert!(line.options.is_empty());
    }

    #[test]
    fn test_enhancements_priced_by_decorators() {
        let brew = ColdDrinkFactory.create_menu_item("cold-brew-1", "Cold Brew", "Steeped", "");
        let line = LineItemSelection::new(&brew)
            .size("small")
            .options(["vanilla", "extra-shot"])
            .into_line_item()
            .unwrap();

        assert_eq!(line.name, "Cold Brew with Vanilla with Extra Shot");
        assert_eq!(line.price, Decimal::new(550, 2));
        assert_eq!(
            line.options,
            vec!["Vanilla Syrup (+$0.50)", "Extra Shot (+$1.00)"]
        );
        assert_eq!(line.id, "cold-brew-1-small-vanilla-extra-shot");
    }

    #[test]
    fn test_plain_option_adds_its_delta() {
        let mut drip = CoffeeFactory.create_menu_item("drip-coffee-1", "Drip Coffee", "", "");
        drip.options = Some(vec![
            MenuOption::free("room", "Room For Cream"),
            MenuOption::priced("honey", "Honey (+$0.25)", Decimal::new(25, 2)),
        ]);

        let line = LineItemSelection::new(&drip)
            .size("small")
            .option("honey")
            .option("room")
            .into_line_item()
            .unwrap();

        assert_eq!(line.name, "Drip Coffee");
        assert_eq!(line.price, Decimal::new(375, 2));
    }

    #[test]
    fn test_unknown_size_falls_back_to_minimum() {
        let line = LineItemSelection::new(&latte())
            .size("venti")
            .into_line_item()
            .unwrap();

        assert_eq!(line.price, Decimal::new(450, 2));
        assert_eq!(line.size, "");
    }

    #[test]
    fn test_missing_size_rejected() {
        let err = LineItemSelection::new(&latte()).into_line_item().unwrap_err();
        assert_eq!(err, MenuError::MissingSize("Latte".to_string()));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = LineItemSelection::new(&latte())
            .size("small")
            .quantity(0)
            .into_line_item()
            .unwrap_err();
        assert_eq!(err, MenuError::InvalidQuantity(0));
    }

    #[test]
    fn test_sizeless_item_uses_minimum_price() {
        let mut scone = CoffeeFactory.create_menu_item("scone-1", "Scone", "", "");
        scone.sizes = None;

        let line = LineItemSelection::new(&scone).into_line_item().unwrap();
        assert_eq!(line.price, Decimal::new(350, 2));
        assert_eq!(line.id, "scone-1--");
    }

    #[test]
    fn test_unoffered_option_ignored() {
        let line = LineItemSelection::new(&latte())
            .size("small")
            .option("extra-shot")
            .into_line_item()
            .unwrap();

        assert_eq!(line.name, "Latte");
        assert_eq!(line.id, "latte-1-small-");
    }
}
