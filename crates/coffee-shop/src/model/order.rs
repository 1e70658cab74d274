//! Placed orders and the payload checkout assembles for them.
//!
//! An order is created by an [`OrderService`](crate::services::OrderService) from a
//! [`NewOrder`] payload assembled at checkout. The line items are a copy of the cart at
//! the moment of placement; later cart changes do not reach them.

use crate::model::CartLineItem;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FulfillmentOption {
    Pickup,
    DineIn,
    Delivery,
    Shipping,
}

impl FulfillmentOption {
    /// Delivery and shipping go to an address.
    pub fn requires_address(self) -> bool {
        matches!(self, Self::Delivery | Self::Shipping)
    }

    /// Everything except shipping is prepared for a chosen time slot.
    pub fn requires_scheduled_time(self) -> bool {
        !matches!(self, Self::Shipping)
    }
}

impl Display for FulfillmentOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pickup => "pickup",
            Self::DineIn => "dine-in",
            Self::Delivery => "delivery",
            Self::Shipping => "shipping",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: String,
    pub status: OrderStatus,
    pub items: Vec<CartLineItem>,
    pub fulfillment: FulfillmentOption,
    pub scheduled_time: Option<String>,
    pub address: Option<String>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub tip: Decimal,
    pub delivery_fee: Decimal,
    pub shipping_fee: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<CartLineItem>,
    pub fulfillment: FulfillmentOption,
    pub scheduled_time: Option<String>,
    pub address: Option<String>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub tip: Decimal,
    pub delivery_fee: Decimal,
    pub shipping_fee: Decimal,
    pub total: Decimal,
}

impl Order {
    /// Materializes a payload into a pending order.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the order service
    /// * `payload` - What checkout assembled
    /// * `created_at` - Placement timestamp
    pub fn from_payload(id: OrderId, payload: NewOrder, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: payload.user_id,
            status: OrderStatus::Pending,
            items: payload.items,
            fulfillment: payload.fulfillment,
            scheduled_time: payload.scheduled_time,
            address: payload.address,
            subtotal: payload.subtotal,
            tax: payload.tax,
            tip: payload.tip,
            delivery_fee: payload.delivery_fee,
            shipping_fee: payload.shipping_fee,
            total: payload.total,
            created_at,
        }
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }
}
