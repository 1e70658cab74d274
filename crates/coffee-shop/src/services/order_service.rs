//! Order storage.

use super::ServiceError;
use crate::model::{NewOrder, Order, OrderId};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{info, instrument};

#[async_trait]
pub trait OrderService: Send + Sync {
    /// Persists a new pending order.
    ///
    /// # Errors
    /// [`ServiceError::EmptyCart`] when the payload has no items.
    async fn create_order(&self, payload: NewOrder) -> Result<Order, ServiceError>;

    /// All orders placed by `user_id`, newest first.
    async fn user_orders(&self, user_id: &str) -> Result<Vec<Order>, ServiceError>;

    /// One order, visible only to the user who placed it.
    async fn order_details(&self, order_id: &OrderId, user_id: &str)
        -> Result<Order, ServiceError>;
}

/// An [`OrderService`] that keeps orders in process memory.
#[derive(Debug)]
pub struct InMemoryOrderService {
    orders: RwLock<Vec<Order>>,
    available: AtomicBool,
}

impl Default for InMemoryOrderService {
    fn default() -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }
}

impl InMemoryOrderService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), ServiceError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ServiceError::Unavailable("order service offline".to_string()))
        }
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    #[instrument(skip(self, payload), fields(user_id = %payload.user_id))]
    async fn create_order(&self, payload: NewOrder) -> Result<Order, ServiceError> {
        self.ensure_available()?;
        if payload.items.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        let order = Order::from_payload(OrderId::new(), payload, Utc::now());
        self.orders.write().await.push(order.clone());
        info!(order_id = %order.id, total = %order.total, "Order created");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn user_orders(&self, user_id: &str) -> Result<Vec<Order>, ServiceError> {
        self.ensure_available()?;
        let orders = self.orders.read().await;
        // Reverse insertion first so orders sharing a timestamp stay newest first.
        let mut mine: Vec<Order> = orders
            .iter()
            .rev()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    #[instrument(skip(self))]
    async fn order_details(
        &self,
        order_id: &OrderId,
        user_id: &str,
    ) -> Result<Order, ServiceError> {
        self.ensure_available()?;
        let orders = self.orders.read().await;
        orders
            .iter()
            .find(|order| order.id == *order_id && order.user_id == user_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(order_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartLineItem, FulfillmentOption};
    use rust_decimal::Decimal;

    fn payload(user_id: &str, total_cents: i64) -> NewOrder {
        let item = CartLineItem {
            id: "latte-1-small-".to_string(),
            name: "Latte".to_string(),
            price: Decimal::new(450, 2),
            image: String::new(),
            quantity: 1,
            size: "Small (12oz)".to_string(),
            options: vec![],
        };
        NewOrder {
            user_id: user_id.to_string(),
            items: vec![item],
            fulfillment: FulfillmentOption::Pickup,
            scheduled_time: Some("09:30".to_string()),
            address: None,
            subtotal: Decimal::new(450, 2),
            tax: Decimal::new(37, 2),
            tip: Decimal::ZERO,
            delivery_fee: Decimal::ZERO,
            shipping_fee: Decimal::ZERO,
            total: Decimal::new(total_cents, 2),
        }
    }

    #[tokio::test]
    async fn test_create_order_is_pending() {
        let service = InMemoryOrderService::new();
        let order = service.create_order(payload("user-1", 487)).await.unwrap();

        assert_eq!(order.status, crate::model::OrderStatus::Pending);
        assert_eq!(order.total, Decimal::new(487, 2));
        assert_eq!(order.item_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_payload_rejected() {
        let service = InMemoryOrderService::new();
        let mut empty = payload("user-1", 0);
        empty.items.clear();

        assert_eq!(
            service.create_order(empty).await,
            Err(ServiceError::EmptyCart)
        );
    }

    #[tokio::test]
    async fn test_user_orders_newest_first() {
        let service = InMemoryOrderService::new();
        let first = service.create_order(payload("user-1", 100)).await.unwrap();
        let second = service.create_order(payload("user-1", 200)).await.unwrap();
        service.create_order(payload("user-2", 300)).await.unwrap();

        let orders = service.user_orders("user-1").await.unwrap();
        let ids: Vec<OrderId> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_details_scoped_to_owner() {
        let service = InMemoryOrderService::new();
        let order = service.create_order(payload("user-1", 100)).await.unwrap();

        assert!(service.order_details(&order.id, "user-1").await.is_ok());
        assert!(matches!(
            service.order_details(&order.id, "user-2").await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
