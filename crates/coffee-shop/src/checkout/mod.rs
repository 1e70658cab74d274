//! # Checkout
//!
//! Turns the current cart into an order.
//!
//! ## Flow
//!
//! ```text
//! CartSession ──state()──► Checkout::place_order ──create_order──► OrderService
//!      ▲                          │
//!      └────────clear_cart()──────┘   (only after the order exists)
//! ```
//!
//! 1. An empty cart is rejected before anything else.
//! 2. The [`CheckoutRequest`] is validated against its [`FulfillmentOption`].
//! 3. [`CheckoutPricing`] computes tax and fees.
//! 4. The order is created; if that fails the cart is left as it was.
//! 5. The cart is cleared.
//!
//! ## Structure
//!
//! - `pricing`: tax rate, flat fees and the [`Quote`] breakdown
//! - `schedule`: pickup and delivery time slots
//! - `error`: [`CheckoutError`]

pub mod error;
pub mod pricing;
pub mod schedule;

pub use crate::model::FulfillmentOption;
pub use error::CheckoutError;
pub use pricing::{CheckoutPricing, Quote};
pub use schedule::{slot_label, time_slots, TimeSlot};

use crate::lifecycle::CartSession;
use crate::model::{AppUser, NewOrder, Order};
use crate::services::OrderService;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument};

/// What the customer chose on the checkout page.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub fulfillment: FulfillmentOption,
    /// Time slot value, see [`time_slots`]
    pub scheduled_time: Option<String>,
    pub address: Option<String>,
    pub tip: Decimal,
}

impl CheckoutRequest {
    /// A request with no tip, time slot or address.
    pub fn new(fulfillment: FulfillmentOption) -> Self {
        Self {
            fulfillment,
            scheduled_time: None,
            address: None,
            tip: Decimal::ZERO,
        }
    }

    pub fn scheduled_at(mut self, slot: impl Into<String>) -> Self {
        self.scheduled_time = Some(slot.into());
        self
    }

    pub fn deliver_to(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_tip(mut self, tip: Decimal) -> Self {
        self.tip = tip;
        self
    }

    /// Checks the request against what its fulfillment option needs.
    ///
    /// # Errors
    /// - [`CheckoutError::InvalidTip`] for a negative tip
    /// - [`CheckoutError::MissingAddress`] for delivery or shipping without an address
    /// - [`CheckoutError::MissingScheduledTime`] for pickup, dine-in or delivery without
    ///   a time slot
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.tip < Decimal::ZERO {
            return Err(CheckoutError::InvalidTip(self.tip));
        }
        if self.fulfillment.requires_address() && is_blank(&self.address) {
            return Err(CheckoutError::MissingAddress(self.fulfillment));
        }
        if self.fulfillment.requires_scheduled_time() && is_blank(&self.scheduled_time) {
            return Err(CheckoutError::MissingScheduledTime(self.fulfillment));
        }
        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Places orders for the cart held by a [`CartSession`].
pub struct Checkout {
    pricing: CheckoutPricing,
    orders: Arc<dyn OrderService>,
}

impl Checkout {
    /// # Arguments
    /// * `pricing` - Tax and fee schedule
    /// * `orders` - Where placed orders are recorded
    pub fn new(pricing: CheckoutPricing, orders: Arc<dyn OrderService>) -> Self {
        Self { pricing, orders }
    }

    pub fn pricing(&self) -> &CheckoutPricing {
        &self.pricing
    }

    /// Breakdown for `subtotal` under `request`, without placing anything.
    pub fn quote(&self, subtotal: Decimal, request: &CheckoutRequest) -> Quote {
        self.pricing.quote(subtotal, request.fulfillment, request.tip)
    }

    /// Places an order for everything currently in the session's cart.
    ///
    /// The cart is cleared only once the order service has accepted the order.
    ///
    /// # Errors
    /// - [`CheckoutError::EmptyCart`] if the cart has no lines
    /// - Any validation error from [`CheckoutRequest::validate`]
    /// - [`CheckoutError::Service`] if the order could not be created
    #[instrument(skip(self, session, user, request), fields(user_id = %user.id, fulfillment = %request.fulfillment))]
    pub async fn place_order(
        &self,
        session: &CartSession,
        user: &AppUser,
        request: &CheckoutRequest,
    ) -> Result<Order, CheckoutError> {
        let cart = session.state();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        request.validate()?;

        let quote = self.quote(cart.subtotal, request);
        let payload = NewOrder {
            user_id: user.id.clone(),
            items: cart.items,
            fulfillment: request.fulfillment,
            scheduled_time: request.scheduled_time.clone(),
            address: request
                .fulfillment
                .requires_address()
                .then(|| request.address.clone())
                .flatten(),
            subtotal: quote.subtotal,
            tax: quote.tax,
            tip: quote.tip,
            delivery_fee: quote.delivery_fee,
            shipping_fee: quote.shipping_fee,
            total: quote.total,
        };

        let order = self.orders.create_order(payload).await?;
        session.clear_cart().await;

        info!(order_id = %order.id, total = %order.total, "Order placed");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_store::CartStore;
    use crate::model::CartLineItem;
    use crate::services::{InMemoryCartService, InMemoryOrderService, ServiceError};
    use state_framework::MemoryStore;

    fn session_with(price_cents: i64, quantity: u32) -> CartSession {
        let session = CartSession::new(
            CartStore::open(Arc::new(MemoryStore::new())),
            Arc::new(InMemoryCartService::new()),
        );
        session.store().add_item(CartLineItem {
            id: "latte-1-medium-".to_string(),
            name: "Latte".to_string(),
            price: Decimal::new(price_cents, 2),
            image: String::new(),
            quantity,
            size: "Medium (16oz)".to_string(),
            options: vec![],
        });
        session
    }

    fn ada() -> AppUser {
        AppUser::new("user-1", "ada@example.com", "Ada")
    }

    #[test]
    fn test_validate_requires_address_for_delivery() {
        let request = CheckoutRequest::new(FulfillmentOption::Delivery).scheduled_at("today-9-30");
        assert_eq!(
            request.validate(),
            Err(CheckoutError::MissingAddress(FulfillmentOption::Delivery))
        );

        let blank = request.clone().deliver_to("   ");
        assert!(blank.validate().is_err());
        assert!(request.deliver_to("1 Main St").validate().is_ok());
    }

    #[test]
    fn test_validate_time_slot_rules() {
        assert_eq!(
            CheckoutRequest::new(FulfillmentOption::DineIn).validate(),
            Err(CheckoutError::MissingScheduledTime(FulfillmentOption::DineIn))
        );
        // Shipping has no time slot.
        let shipping = CheckoutRequest::new(FulfillmentOption::Shipping).deliver_to("1 Main St");
        assert!(shipping.validate().is_ok());
    }

    #[test]
    fn test_negative_tip_rejected() {
        let request = CheckoutRequest::new(FulfillmentOption::Pickup)
            .scheduled_at("today-9-30")
            .with_tip(Decimal::new(-1, 0));
        assert_eq!(
            request.validate(),
            Err(CheckoutError::InvalidTip(Decimal::new(-1, 0)))
        );
    }

    #[tokio::test]
    async fn test_place_order_clears_cart() {
        let orders = Arc::new(InMemoryOrderService::new());
        let checkout = Checkout::new(CheckoutPricing::default(), orders.clone());
        let session = session_with(500, 2);
        let request = CheckoutRequest::new(FulfillmentOption::Delivery)
            .scheduled_at("today-9-30")
            .deliver_to("1 Main St")
            .with_tip(Decimal::new(200, 2));

        let order = checkout.place_order(&session, &ada(), &request).await.unwrap();

        assert_eq!(order.subtotal, Decimal::new(1000, 2));
        assert_eq!(order.tax, Decimal::new(83, 2));
        assert_eq!(order.delivery_fee, Decimal::new(399, 2));
        assert_eq!(order.total, Decimal::new(1682, 2));
        assert_eq!(order.address.as_deref(), Some("1 Main St"));
        assert!(session.state().is_empty());
        assert_eq!(orders.user_orders("user-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_pickup_drops_address() {
        let checkout = Checkout::new(
            CheckoutPricing::default(),
            Arc::new(InMemoryOrderService::new()),
        );
        let session = session_with(500, 1);
        let request = CheckoutRequest::new(FulfillmentOption::Pickup)
            .scheduled_at("today-9-30")
            .deliver_to("1 Main St");

        let order = checkout.place_order(&session, &ada(), &request).await.unwrap();
        assert_eq!(order.address, None);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let checkout = Checkout::new(
            CheckoutPricing::default(),
            Arc::new(InMemoryOrderService::new()),
        );
        let session = CartSession::new(
            CartStore::open(Arc::new(MemoryStore::new())),
            Arc::new(InMemoryCartService::new()),
        );
        let request = CheckoutRequest::new(FulfillmentOption::Pickup).scheduled_at("today-9-30");

        let result = checkout.place_order(&session, &ada(), &request).await;
        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_failed_order_keeps_cart() {
        let orders = Arc::new(InMemoryOrderService::new());
        orders.set_available(false);
        let checkout = Checkout::new(CheckoutPricing::default(), orders);
        let session = session_with(500, 1);
        let request = CheckoutRequest::new(FulfillmentOption::Pickup).scheduled_at("today-9-30");

        let result = checkout.place_order(&session, &ada(), &request).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Service(ServiceError::Unavailable(_)))
        ));
        assert_eq!(session.state().item_count, 1);
    }
}
