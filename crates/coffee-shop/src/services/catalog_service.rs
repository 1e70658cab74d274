//! Products and categories behind the menu.

use super::ServiceError;
use crate::menu::{seed_catalog, MenuError, MenuItemRegistry};
use crate::model::{Category, MenuItem};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Read and admin access to the catalog.
///
/// Listings are ordered by name. Products point at their category by name, so
/// [`products_by_category`](Self::products_by_category) takes a category id and
/// resolves it first.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn all_products(&self) -> Result<Vec<MenuItem>, ServiceError>;

    async fn product(&self, id: &str) -> Result<MenuItem, ServiceError>;

    /// Products in the category with id `category_id`.
    ///
    /// # Errors
    /// [`ServiceError::NotFound`] when no such category exists.
    async fn products_by_category(&self, category_id: &str)
        -> Result<Vec<MenuItem>, ServiceError>;

    /// # Errors
    /// [`ServiceError::AlreadyExists`] when a product with the same id is present.
    async fn create_product(&self, product: MenuItem) -> Result<MenuItem, ServiceError>;

    /// Replaces the product stored under `id`. The stored id is kept.
    async fn update_product(&self, id: &str, product: MenuItem)
        -> Result<MenuItem, ServiceError>;

    async fn delete_product(&self, id: &str) -> Result<(), ServiceError>;

    async fn categories(&self) -> Result<Vec<Category>, ServiceError>;

    async fn category(&self, id: &str) -> Result<Category, ServiceError>;

    async fn create_category(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Category, ServiceError>;

    /// Renames or redescribes a category. Products filed under the old name move with it.
    async fn update_category(
        &self,
        id: &str,
        name: &str,
        description: Option<String>,
    ) -> Result<Category, ServiceError>;

    /// Removes the category. Its products stay in the catalog.
    async fn delete_category(&self, id: &str) -> Result<(), ServiceError>;
}

#[derive(Debug, Default)]
struct CatalogTables {
    products: Vec<MenuItem>,
    categories: Vec<Category>,
}

/// A [`CatalogService`] over process memory.
#[derive(Debug)]
pub struct InMemoryCatalogService {
    tables: RwLock<CatalogTables>,
    available: AtomicBool,
}

impl Default for InMemoryCatalogService {
    fn default() -> Self {
        Self {
            tables: RwLock::new(CatalogTables::default()),
            available: AtomicBool::new(true),
        }
    }
}

impl InMemoryCatalogService {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding the seeded demo menu, with one category per distinct
    /// product category.
    pub fn seeded(registry: &MenuItemRegistry) -> Result<Self, MenuError> {
        let products = seed_catalog(registry)?;
        let mut categories: Vec<Category> = Vec::new();
        for product in &products {
            if !categories.iter().any(|c| c.name == product.category) {
                categories.push(Category::named(product.category.clone(), None));
            }
        }
        info!(
            products = products.len(),
            categories = categories.len(),
            "Seeded catalog"
        );

        Ok(Self {
            tables: RwLock::new(CatalogTables {
                products,
                categories,
            }),
            available: AtomicBool::new(true),
        })
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), ServiceError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ServiceError::Unavailable("catalog service offline".to_string()))
        }
    }
}

fn sorted_by_name(mut products: Vec<MenuItem>) -> Vec<MenuItem> {
    products.sort_by(|a, b| a.name.cmp(&b.name));
    products
}

#[async_trait]
impl CatalogService for InMemoryCatalogService {
    #[instrument(skip(self))]
    async fn all_products(&self) -> Result<Vec<MenuItem>, ServiceError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        Ok(sorted_by_name(tables.products.clone()))
    }

    #[instrument(skip(self))]
    async fn product(&self, id: &str) -> Result<MenuItem, ServiceError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        tables
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn products_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<MenuItem>, ServiceError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        let category = tables
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| ServiceError::NotFound(category_id.to_string()))?;

        let products = tables
            .products
            .iter()
            .filter(|p| p.category == category.name)
            .cloned()
            .collect();
        Ok(sorted_by_name(products))
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn create_product(&self, product: MenuItem) -> Result<MenuItem, ServiceError> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        if tables.products.iter().any(|p| p.id == product.id) {
            return Err(ServiceError::AlreadyExists(product.id));
        }

        tables.products.push(product.clone());
        debug!("Created product");
        Ok(product)
    }

    #[instrument(skip(self, product))]
    async fn update_product(
        &self,
        id: &str,
        mut product: MenuItem,
    ) -> Result<MenuItem, ServiceError> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        let slot = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        product.id = id.to_string();
        *slot = product.clone();
        debug!("Updated product");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: &str) -> Result<(), ServiceError> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        if tables.products.len() == before {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        debug!("Deleted product");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn categories(&self) -> Result<Vec<Category>, ServiceError> {
        self.ensure_available()?;
        let mut categories = self.tables.read().await.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn category(&self, id: &str) -> Result<Category, ServiceError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        tables
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, description))]
    async fn create_category(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Category, ServiceError> {
        self.ensure_available()?;
        let category = Category::named(name, description);
        let mut tables = self.tables.write().await;
        if tables.categories.iter().any(|c| c.id == category.id) {
            return Err(ServiceError::AlreadyExists(category.id));
        }

        tables.categories.push(category.clone());
        debug!(category_id = %category.id, "Created category");
        Ok(category)
    }

    #[instrument(skip(self, description))]
    async fn update_category(
        &self,
        id: &str,
        name: &str,
        description: Option<String>,
    ) -> Result<Category, ServiceError> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        let tables = &mut *tables;
        let category = tables
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        let old_name = std::mem::replace(&mut category.name, name.to_string());
        category.description = description;
        let updated = category.clone();

        for product in tables.products.iter_mut().filter(|p| p.category == old_name) {
            product.category = name.to_string();
        }
        debug!("Updated category");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, id: &str) -> Result<(), ServiceError> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        if tables.categories.len() == before {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        debug!("Deleted category");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryCatalogService {
        InMemoryCatalogService::seeded(&MenuItemRegistry::with_defaults()).unwrap()
    }

    #[tokio::test]
    async fn test_product_by_id() {
        let catalog = seeded();

        let latte = catalog.product("latte-1").await.unwrap();
        assert_eq!(latte.name, "Latte");
        assert_eq!(latte.category, "Lattes & Seasonal");

        assert_eq!(
            catalog.product("scone-1").await,
            Err(ServiceError::NotFound("scone-1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_products_by_category() {
        let catalog = seeded();

        let coffee = catalog.products_by_category("coffee").await.unwrap();
        assert!(!coffee.is_empty());
        assert!(coffee.iter().all(|p| p.category == "Coffee"));
        assert!(coffee.iter().any(|p| p.id == "drip-coffee-1"));

        assert!(matches!(
            catalog.products_by_category("pastries").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_seeded_categories_sorted_by_name() {
        let names: Vec<String> = seeded()
            .categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["Coffee", "Lattes & Seasonal", "Other Drinks"]);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let catalog = seeded();
        let before = catalog.all_products().await.unwrap().len();

        catalog.delete_product("latte-1").await.unwrap();

        assert_eq!(catalog.all_products().await.unwrap().len(), before - 1);
        assert!(catalog.product("latte-1").await.is_err());
        assert_eq!(
            catalog.delete_product("latte-1").await,
            Err(ServiceError::NotFound("latte-1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_create_and_update_product() {
        let catalog = seeded();
        let mut mocha = catalog.product("latte-1").await.unwrap();
        mocha.id = "mocha-1".to_string();
        mocha.name = "Mocha".to_string();

        catalog.create_product(mocha.clone()).await.unwrap();
        assert_eq!(
            catalog.create_product(mocha.clone()).await,
            Err(ServiceError::AlreadyExists("mocha-1".to_string()))
        );

        mocha.id = "ignored".to_string();
        mocha.description = "Espresso, chocolate and milk".to_string();
        let updated = catalog.update_product("mocha-1", mocha).await.unwrap();

        assert_eq!(updated.id, "mocha-1");
        assert_eq!(
            catalog.product("mocha-1").await.unwrap().description,
            "Espresso, chocolate and milk"
        );
    }

    #[tokio::test]
    async fn test_category_lifecycle() {
        let catalog = seeded();

        let pastries = catalog
            .create_category("Pastries", Some("Baked daily".to_string()))
            .await
            .unwrap();
        assert_eq!(pastries.id, "pastries");
        assert!(catalog.create_category("Pastries", None).await.is_err());

        let renamed = catalog
            .update_category("coffee", "Brewed Coffee", None)
            .await
            .unwrap();
        assert_eq!(renamed.id, "coffee");
        let drip = catalog.product("drip-coffee-1").await.unwrap();
        assert_eq!(drip.category, "Brewed Coffee");

        catalog.delete_category("pastries").await.unwrap();
        assert!(catalog.category("pastries").await.is_err());
    }

    #[tokio::test]
    async fn test_offline_catalog_fails() {
        let catalog = seeded();
        catalog.set_available(false);

        assert!(matches!(
            catalog.all_products().await,
            Err(ServiceError::Unavailable(_))
        ));
    }
}
