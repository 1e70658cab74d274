use super::{ColdDrinkFactory, CoffeeFactory, LatteFactory, MenuError, MenuItemFactory};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub const COFFEE: &str = "coffee";
pub const LATTE: &str = "latte";
pub const COLD_DRINK: &str = "cold-drink";

/// Maps category keys to factories.
///
/// The registry is an ordinary value: whoever builds the catalog owns it and passes it
/// where it is needed. Registering a key twice replaces the earlier factory.
#[derive(Clone, Default)]
pub struct MenuItemRegistry {
    factories: HashMap<String, Arc<dyn MenuItemFactory>>,
}

impl MenuItemRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the `coffee`, `latte` and `cold-drink` factories.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_factory(COFFEE, Arc::new(CoffeeFactory));
        registry.register_factory(LATTE, Arc::new(LatteFactory));
        registry.register_factory(COLD_DRINK, Arc::new(ColdDrinkFactory));
        registry
    }

    /// Looks up the factory for `key`.
    ///
    /// # Errors
    /// Returns [`MenuError::FactoryNotFound`] when nothing is registered under `key`.
    pub fn get_factory(&self, key: &str) -> Result<Arc<dyn MenuItemFactory>, MenuError> {
        self.factories
            .get(key)
            .cloned()
            .ok_or_else(|| MenuError::FactoryNotFound(key.to_string()))
    }

    /// Registers `factory` under `key`, replacing any previous registration.
    pub fn register_factory(&mut self, key: impl Into<String>, factory: Arc<dyn MenuItemFactory>) {
        let key = key.into();
        if self.factories.insert(key.clone(), factory).is_some() {
            debug!(key = %key, "Replaced menu item factory");
        } else {
            debug!(key = %key, "Registered menu item factory");
        }
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.factories.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }
}

impl fmt::Debug for MenuItemRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItemRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MenuItem;
    use rust_decimal::Decimal;

    struct PastryFactory;

    impl MenuItemFactory for PastryFactory {
        fn create_menu_item(&self, id: &str, name: &str, description: &str, image: &str) -> MenuItem {
            MenuItem {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                image: image.to_string(),
                category: "Pastries".to_string(),
                price_min: Decimal::new(300, 2),
                price_max: Decimal::new(300, 2),
                sizes: None,
                options: None,
            }
        }
    }

    #[test]
    fn test_defaults_resolve_coffee() {
        let registry = MenuItemRegistry::with_defaults();
        let factory = registry.get_factory("coffee").unwrap();
        let item = factory.create_menu_item("drip-coffee-1", "Drip Coffee", "", "");

        assert_eq!(item.category, "Coffee");
        assert_eq!(item.price_min, Decimal::new(350, 2));
        assert_eq!(item.price_max, Decimal::new(450, 2));
        assert_eq!(item.sizes.map(|s| s.len()), Some(3));
    }

    #[test]
    fn test_unknown_key_fails() {
        let registry = MenuItemRegistry::with_defaults();
        let err = registry.get_factory("nonexistent-category").err();

        assert_eq!(
            err,
            Some(MenuError::FactoryNotFound("nonexistent-category".to_string()))
        );
    }

    #[test]
    fn test_empty_registry_has_nothing() {
        let registry = MenuItemRegistry::new();
        assert!(registry.get_factory("coffee").is_err());
        assert!(registry.keys().is_empty());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = MenuItemRegistry::with_defaults();
        registry.register_factory("coffee", Arc::new(PastryFactory));

        let item = registry
            .get_factory("coffee")
            .unwrap()
            .create_menu_item("croissant-1", "Croissant", "", "");
        assert_eq!(item.category, "Pastries");
        assert_eq!(registry.keys(), vec!["coffee", "cold-drink", "latte"]);
    }

    #[test]
    fn test_registries_are_isolated() {
        let mut custom = MenuItemRegistry::with_defaults();
        custom.register_factory("pastry", Arc::new(PastryFactory));

        let fresh = MenuItemRegistry::with_defaults();
        assert!(custom.contains("pastry"));
        assert!(!fresh.contains("pastry"));
    }
}
