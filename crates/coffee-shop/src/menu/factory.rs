//! Category archetypes.
//!
//! Each factory fixes a category, a price range, a default size ladder and a default
//! option list. Callers only supply the identity fields.

use crate::model::{MenuItem, MenuOption, SizeVariant};
use rust_decimal::Decimal;

/// Produces fully populated [`MenuItem`] records for one category.
pub trait MenuItemFactory: Send + Sync {
    /// Builds a record with this factory's defaults.
    fn create_menu_item(&self, id: &str, name: &str, description: &str, image: &str) -> MenuItem;

    /// Builds a record, replacing the default sizes and/or options when overrides are given.
    ///
    /// Overrides replace the defaults wholesale; they are never merged.
    fn create_complete_menu_item(
        &self,
        id: &str,
        name: &str,
        description: &str,
        image: &str,
        sizes: Option<Vec<SizeVariant>>,
        options: Option<Vec<MenuOption>>,
    ) -> MenuItem {
        let mut item = self.create_menu_item(id, name, description, image);
        if let Some(sizes) = sizes {
            item.sizes = Some(sizes);
        }
        if let Some(options) = options {
            item.options = Some(options);
        }
        item
    }
}

fn dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    name: &str,
    description: &str,
    image: &str,
    category: &str,
    price_range: (Decimal, Decimal),
    sizes: Vec<SizeVariant>,
    options: Vec<MenuOption>,
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        category: category.to_string(),
        price_min: price_range.0,
        price_max: price_range.1,
        sizes: Some(sizes),
        options: Some(options),
    }
}

/// Hot brewed coffee.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoffeeFactory;

impl MenuItemFactory for CoffeeFactory {
    fn create_menu_item(&self, id: &str, name: &str, description: &str, image: &str) -> MenuItem {
        record(
            id,
            name,
            description,
            image,
            "Coffee",
            (dollars(350), dollars(450)),
            vec![
                SizeVariant::new("small", "Small (12oz)", dollars(350)),
                SizeVariant::new("medium", "Medium (16oz)", dollars(400)),
                SizeVariant::new("large", "Large (20oz)", dollars(450)),
            ],
            vec![
                MenuOption::free("room", "Room For Cream"),
                MenuOption::free("no-room", "No Room"),
            ],
        )
    }
}

/// Espresso and milk drinks.
///
/// The milk options carry no price of their own; the surcharge comes from the
/// matching pricing decorator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatteFactory;

impl LatteFactory {
    /// The default latte options, reused by seasonal drinks built on other factories.
    pub fn default_options() -> Vec<MenuOption> {
        vec![
            MenuOption::free("oat-milk", "Oat Milk (+$0.75)"),
            MenuOption::free("almond-milk", "Almond Milk (+$0.75)"),
            MenuOption::free("whole-milk", "Whole Milk"),
        ]
    }
}

impl MenuItemFactory for LatteFactory {
    fn create_menu_item(&self, id: &str, name: &str, description: &str, image: &str) -> MenuItem {
        record(
            id,
            name,
            description,
            image,
            "Lattes & Seasonal",
            (dollars(450), dollars(550)),
            vec![
                SizeVariant::new("small", "Small (12oz)", dollars(450)),
                SizeVariant::new("medium", "Medium (16oz)", dollars(500)),
                SizeVariant::new("large", "Large (20oz)", dollars(550)),
            ],
            Self::default_options(),
        )
    }
}

/// Iced and cold brewed drinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColdDrinkFactory;

impl MenuItemFactory for ColdDrinkFactory {
    fn create_menu_item(&self, id: &str, name: &str, description: &str, image: &str) -> MenuItem {
        record(
            id,
            name,
            description,
            image,
            "Other Drinks",
            (dollars(400), dollars(500)),
            vec![
                SizeVariant::new("small", "Small (16oz)", dollars(400)),
                SizeVariant::new("large", "Large (24oz)", dollars(500)),
            ],
            vec![
                MenuOption::free("extra-shot", "Extra Shot (+$1.00)"),
                MenuOption::free("vanilla", "Vanilla Syrup (+$0.50)"),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coffee_defaults() {
        let item = CoffeeFactory.create_menu_item("drip-coffee-1", "Drip Coffee", "House", "/img");

        assert_eq!(item.category, "Coffee");
        assert_eq!(item.price_min, dollars(350));
        assert_eq!(item.price_max, dollars(450));
        let sizes = item.sizes.unwrap();
        assert_eq!(sizes.len(), 3);
        assert_eq!(sizes[1], SizeVariant::new("medium", "Medium (16oz)", dollars(400)));
        assert_eq!(item.options.unwrap()[0].value, "room");
    }

    #[test]
    fn test_cold_drink_has_two_sizes() {
        let item = ColdDrinkFactory.create_menu_item("cold-brew-1", "Cold Brew", "", "");

        assert_eq!(item.category, "Other Drinks");
        let labels: Vec<String> = item.sizes.unwrap().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Small (16oz)", "Large (24oz)"]);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let sizes = vec![SizeVariant::new("regular", "Regular", dollars(600))];
        let item = LatteFactory.create_complete_menu_item(
            "matcha-latte-1",
            "Matcha Latte",
            "",
            "",
            Some(sizes.clone()),
            None,
        );

        assert_eq!(item.sizes, Some(sizes));
        assert_eq!(item.options, Some(LatteFactory::default_options()));
        assert_eq!(item.category, "Lattes & Seasonal");
    }

    #[test]
    fn test_empty_override_is_not_merged() {
        let item = CoffeeFactory.create_complete_menu_item("x", "X", "", "", None, Some(vec![]));
        assert_eq!(item.options, Some(vec![]));
        assert!(item.has_sizes());
    }
}
