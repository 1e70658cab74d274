//! Catalog records produced by the menu item factories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A display record for one menu entry.
///
/// Created once by a [`MenuItemFactory`](crate::menu::MenuItemFactory) when the catalog
/// is built and treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub price_min: Decimal,
    pub price_max: Decimal,
    pub sizes: Option<Vec<SizeVariant>>,
    pub options: Option<Vec<MenuOption>>,
}

impl MenuItem {
    /// Looks up a size variant by its value key.
    pub fn size(&self, value: &str) -> Option<&SizeVariant> {
        self.sizes.as_deref()?.iter().find(|s| s.value == value)
    }

    /// Looks up an option by its value key.
    pub fn option(&self, value: &str) -> Option<&MenuOption> {
        self.options.as_deref()?.iter().find(|o| o.value == value)
    }

    pub fn has_sizes(&self) -> bool {
        self.sizes.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// A size with an absolute price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeVariant {
    pub value: String,
    pub label: String,
    pub price: Decimal,
}

impl SizeVariant {
    pub fn new(value: impl Into<String>, label: impl Into<String>, price: Decimal) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            price,
        }
    }
}

/// An add-on choice. `price` is a delta on top of the size price, when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOption {
    pub value: String,
    pub label: String,
    pub price: Option<Decimal>,
}

impl MenuOption {
    /// An option that does not change the price.
    pub fn free(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            price: None,
        }
    }

    /// An option that adds `delta` to the unit price.
    pub fn priced(value: impl Into<String>, label: impl Into<String>, delta: Decimal) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            price: Some(delta),
        }
    }
}

/// A menu section. Menu items refer to it by `name` through [`MenuItem::category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    /// A category whose id is derived from `name`, e.g. `"Lattes & Seasonal"` becomes
    /// `lattes-seasonal`.
    pub fn named(name: impl Into<String>, description: Option<String>) -> Self {
        let name = name.into();
        Self {
            id: category_slug(&name),
            name,
            description,
        }
    }
}

fn category_slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_id_from_name() {
        assert_eq!(Category::named("Lattes & Seasonal", None).id, "lattes-seasonal");
        assert_eq!(Category::named("Coffee", None).id, "coffee");
    }
}
