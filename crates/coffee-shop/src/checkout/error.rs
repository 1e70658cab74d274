//! Error types for checkout.

use crate::model::FulfillmentOption;
use crate::services::ServiceError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("An address is required for {0}")]
    MissingAddress(FulfillmentOption),

    #[error("A time slot is required for {0}")]
    MissingScheduledTime(FulfillmentOption),

    #[error("Invalid tip: {0}")]
    InvalidTip(Decimal),

    #[error("Sign in to place an order")]
    NotSignedIn,

    #[error(transparent)]
    Service(#[from] ServiceError),
}
