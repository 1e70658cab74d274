//! Server-side carts for signed-in users.

use super::ServiceError;
use crate::model::{merge_line_item, CartLineItem};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Type-safe identifier for remote carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub Uuid);

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// CRUD over one cart per user.
///
/// `add_item` follows the same merge rule as the local cart: a line with the same id,
/// size and options gains quantity instead of being duplicated.
#[async_trait]
pub trait RemoteCartService: Send + Sync {
    /// Returns the user's cart, creating an empty one on first use.
    async fn get_or_create_cart(&self, user_id: &str) -> Result<CartId, ServiceError>;

    async fn cart_items(&self, cart_id: &CartId) -> Result<Vec<CartLineItem>, ServiceError>;

    async fn add_item(&self, cart_id: &CartId, item: CartLineItem) -> Result<(), ServiceError>;

    /// Sets a line's quantity. Zero removes the line.
    async fn update_quantity(
        &self,
        cart_id: &CartId,
        line_id: &str,
        quantity: u32,
    ) -> Result<(), ServiceError>;

    async fn remove_item(&self, cart_id: &CartId, line_id: &str) -> Result<(), ServiceError>;

    async fn clear(&self, cart_id: &CartId) -> Result<(), ServiceError>;
}

#[derive(Debug, Default)]
struct CartTables {
    owners: HashMap<String, CartId>,
    lines: HashMap<CartId, Vec<CartLineItem>>,
}

/// A [`RemoteCartService`] that keeps everything in process memory.
#[derive(Debug)]
pub struct InMemoryCartService {
    tables: RwLock<CartTables>,
    available: AtomicBool,
}

impl Default for InMemoryCartService {
    fn default() -> Self {
        Self {
            tables: RwLock::new(CartTables::default()),
            available: AtomicBool::new(true),
        }
    }
}

impl InMemoryCartService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the backend going offline (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), ServiceError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ServiceError::Unavailable("cart service offline".to_string()))
        }
    }

    async fn with_lines<R>(
        &self,
        cart_id: &CartId,
        f: impl FnOnce(&mut Vec<CartLineItem>) -> R,
    ) -> Result<R, ServiceError> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        let lines = tables
            .lines
            .get_mut(cart_id)
            .ok_or_else(|| ServiceError::NotFound(cart_id.to_string()))?;
        Ok(f(lines))
    }
}

#[async_trait]
impl RemoteCartService for InMemoryCartService {
    #[instrument(skip(self))]
    async fn get_or_create_cart(&self, user_id: &str) -> Result<CartId, ServiceError> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        if let Some(id) = tables.owners.get(user_id) {
            return Ok(*id);
        }

        let id = CartId(Uuid::new_v4());
        tables.owners.insert(user_id.to_string(), id);
        tables.lines.insert(id, Vec::new());
        debug!(cart_id = %id, "Created remote cart");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn cart_items(&self, cart_id: &CartId) -> Result<Vec<CartLineItem>, ServiceError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        tables
            .lines
            .get(cart_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(cart_id.to_string()))
    }

    #[instrument(skip(self, item), fields(line_id = %item.id))]
    async fn add_item(&self, cart_id: &CartId, item: CartLineItem) -> Result<(), ServiceError> {
        let merged = self
            .with_lines(cart_id, |lines| merge_line_item(lines, item))
            .await?;
        debug!(merged, "Stored remote cart line");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_quantity(
        &self,
        cart_id: &CartId,
        line_id: &str,
        quantity: u32,
    ) -> Result<(), ServiceError> {
        self.with_lines(cart_id, |lines| {
            if quantity == 0 {
                lines.retain(|line| line.id != line_id);
            } else {
                for line in lines.iter_mut().filter(|line| line.id == line_id) {
                    line.quantity = quantity;
                }
            }
        })
        .await
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, cart_id: &CartId, line_id: &str) -> Result<(), ServiceError> {
        self.with_lines(cart_id, |lines| lines.retain(|line| line.id != line_id))
            .await
    }

    #[instrument(skip(self))]
    async fn clear(&self, cart_id: &CartId) -> Result<(), ServiceError> {
        self.with_lines(cart_id, |lines| lines.clear()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn mocha(quantity: u32) -> CartLineItem {
        CartLineItem {
            id: "mocha-1-small-".to_string(),
            name: "Mocha".to_string(),
            price: Decimal::new(525, 2),
            image: String::new(),
            quantity,
            size: "Small (12oz)".to_string(),
            options: vec![],
        }
    }

    #[tokio::test]
    async fn test_get_or_create_is_stable_per_user() {
        let service = InMemoryCartService::new();

        let first = service.get_or_create_cart("user-1").await.unwrap();
        let again = service.get_or_create_cart("user-1").await.unwrap();
        let other = service.get_or_create_cart("user-2").await.unwrap();

        assert_eq!(first, again);
        assert_ne!(first, other);
        assert!(service.cart_items(&first).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_merges_and_update_zero_removes() {
        let service = InMemoryCartService::new();
        let cart = service.get_or_create_cart("user-1").await.unwrap();

        service.add_item(&cart, mocha(1)).await.unwrap();
        service.add_item(&cart, mocha(2)).await.unwrap();
        let items = service.cart_items(&cart).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);

        service.update_quantity(&cart, "mocha-1-small-", 0).await.unwrap();
        assert!(service.cart_items(&cart).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_cart_is_not_found() {
        let service = InMemoryCartService::new();
        let missing = CartId(Uuid::nil());

        let result = service.clear(&missing).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_offline_service_rejects_calls() {
        let service = InMemoryCartService::new();
        let cart = service.get_or_create_cart("user-1").await.unwrap();
        service.set_available(false);

        let result = service.add_item(&cart, mocha(1)).await;
        assert!(matches!(result, Err(ServiceError::Unavailable(_))));

        service.set_available(true);
        service.add_item(&cart, mocha(1)).await.unwrap();
    }
}
