//! The demo catalog.

use super::registry::{COFFEE, COLD_DRINK, LATTE};
use super::{LatteFactory, MenuError, MenuItemRegistry};
use crate::model::{MenuItem, SizeVariant};
use rust_decimal::Decimal;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=300&width=300";

/// Category filter value that matches every item.
pub const ALL_CATEGORIES: &str = "All";

fn tea_latte_sizes(small_cents: i64) -> Vec<SizeVariant> {
    vec![
        SizeVariant::new("small", "Small (12oz)", Decimal::new(small_cents, 2)),
        SizeVariant::new("medium", "Medium (16oz)", Decimal::new(small_cents + 50, 2)),
        SizeVariant::new("large", "Large (20oz)", Decimal::new(small_cents + 100, 2)),
    ]
}

/// Builds the storefront menu through `registry`.
///
/// # Errors
/// Fails with [`MenuError::FactoryNotFound`] if `registry` lacks one of the
/// `coffee`, `latte` or `cold-drink` factories.
pub fn seed_catalog(registry: &MenuItemRegistry) -> Result<Vec<MenuItem>, MenuError> {
    let coffee = registry.get_factory(COFFEE)?;
    let latte = registry.get_factory(LATTE)?;
    let cold = registry.get_factory(COLD_DRINK)?;

    // Tea lattes are served cold-bar style but priced and optioned like lattes.
    let tea_latte = |id: &str, name: &str, description: &str, small_cents: i64| {
        cold.create_complete_menu_item(
            id,
            name,
            description,
            PLACEHOLDER_IMAGE,
            Some(tea_latte_sizes(small_cents)),
            Some(LatteFactory::default_options()),
        )
    };

    Ok(vec![
        coffee.create_menu_item(
            "drip-coffee-1",
            "Drip Coffee",
            "Batch brewed coffee",
            PLACEHOLDER_IMAGE,
        ),
        latte.create_menu_item(
            "latte-1",
            "Latte",
            "Espresso with steamed milk",
            PLACEHOLDER_IMAGE,
        ),
        latte.create_menu_item(
            "cappuccino-1",
            "Cappuccino",
            "Espresso with equal parts steamed milk and foam",
            PLACEHOLDER_IMAGE,
        ),
        cold.create_menu_item(
            "iced-coffee-1",
            "Iced Coffee",
            "Brewed hot over ice",
            PLACEHOLDER_IMAGE,
        ),
        cold.create_menu_item(
            "cold-brew-1",
            "Cold Brew",
            "Steeped for 24 hours",
            PLACEHOLDER_IMAGE,
        ),
        tea_latte(
            "chai-latte-1",
            "Chai Latte",
            "Spiced tea with steamed milk",
            450,
        ),
        tea_latte(
            "matcha-latte-1",
            "Matcha Latte",
            "Japanese green tea with steamed milk",
            500,
        ),
    ])
}

/// Items in `category`, or every item for [`ALL_CATEGORIES`].
pub fn filter_by_category<'a>(items: &'a [MenuItem], category: &str) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| category == ALL_CATEGORIES || item.category == category)
        .collect()
}

/// Finds an item by id.
pub fn find_item<'a>(items: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
    items.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_builds_seven_items() {
        let items = seed_catalog(&MenuItemRegistry::with_defaults()).unwrap();

        assert_eq!(items.len(), 7);
        assert!(items.iter().all(|i| i.image == PLACEHOLDER_IMAGE));
        assert_eq!(filter_by_category(&items, "Coffee").len(), 1);
        assert_eq!(filter_by_category(&items, "Lattes & Seasonal").len(), 2);
        assert_eq!(filter_by_category(&items, "Other Drinks").len(), 4);
        assert_eq!(filter_by_category(&items, ALL_CATEGORIES).len(), 7);
    }

    #[test]
    fn test_tea_lattes_use_overrides() {
        let items = seed_catalog(&MenuItemRegistry::with_defaults()).unwrap();
        let matcha = find_item(&items, "matcha-latte-1").unwrap();

        assert_eq!(matcha.category, "Other Drinks");
        assert_eq!(
            matcha.size("large").map(|s| s.price),
            Some(Decimal::new(600, 2))
        );
        assert!(matcha.option("oat-milk").is_some());
        assert!(matcha.option("extra-shot").is_none());
    }

    #[test]
    fn test_seed_requires_default_factories() {
        let err = seed_catalog(&MenuItemRegistry::new()).unwrap_err();
        assert_eq!(err, MenuError::FactoryNotFound("coffee".to_string()));
    }
}
