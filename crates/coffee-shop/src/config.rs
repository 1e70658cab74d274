//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `COFFEE_SHOP_DATA_DIR` - Directory for the local cart slot (default: `.coffee-shop`)
//! - `COFFEE_SHOP_CART_KEY` - Slot key for the local cart (default: `cart`)
//! - `COFFEE_SHOP_TAX_RATE` - Sales tax as a fraction (default: `0.0825`)
//! - `COFFEE_SHOP_DELIVERY_FEE` - Flat delivery fee (default: `3.99`)
//! - `COFFEE_SHOP_SHIPPING_FEE` - Flat shipping fee (default: `5.99`)

use crate::cart_store::CART_STORAGE_KEY;
use crate::checkout::CheckoutPricing;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".coffee-shop";
const DEFAULT_TAX_RATE: &str = "0.0825";
const DEFAULT_DELIVERY_FEE: &str = "3.99";
const DEFAULT_SHIPPING_FEE: &str = "5.99";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Coffee shop runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopConfig {
    /// Root directory of the file-backed cart slot
    pub data_dir: PathBuf,
    /// Key of the local cart inside the slot
    pub cart_key: String,
    /// Tax and fee schedule used at checkout
    pub pricing: CheckoutPricing,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: CART_STORAGE_KEY.to_string(),
            pricing: CheckoutPricing::default(),
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a numeric variable does not parse or
    /// is negative.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let data_dir = PathBuf::from(get_or_default("COFFEE_SHOP_DATA_DIR", DEFAULT_DATA_DIR));
        let cart_key = get_or_default("COFFEE_SHOP_CART_KEY", CART_STORAGE_KEY);
        if cart_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "COFFEE_SHOP_CART_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let tax_rate = parse_amount(
            "COFFEE_SHOP_TAX_RATE",
            &get_or_default("COFFEE_SHOP_TAX_RATE", DEFAULT_TAX_RATE),
        )?;
        let delivery_fee = parse_amount(
            "COFFEE_SHOP_DELIVERY_FEE",
            &get_or_default("COFFEE_SHOP_DELIVERY_FEE", DEFAULT_DELIVERY_FEE),
        )?;
        let shipping_fee = parse_amount(
            "COFFEE_SHOP_SHIPPING_FEE",
            &get_or_default("COFFEE_SHOP_SHIPPING_FEE", DEFAULT_SHIPPING_FEE),
        )?;

        Ok(Self {
            data_dir,
            cart_key,
            pricing: CheckoutPricing {
                tax_rate,
                delivery_fee,
                shipping_fee,
            },
        })
    }
}

/// Parses a non-negative decimal.
fn parse_amount(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let value = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if value.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(value)
}
