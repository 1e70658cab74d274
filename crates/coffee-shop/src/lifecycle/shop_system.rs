use super::{CartMode, CartSession};
use crate::cart_store::CartStore;
use crate::checkout::{Checkout, CheckoutError, CheckoutRequest};
use crate::config::ShopConfig;
use crate::menu::{LineItemSelection, MenuError, MenuItemRegistry};
use crate::model::{AppUser, MenuItem, Order, OrderId};
use crate::services::{
    CatalogService, IdentityProvider, InMemoryCartService, InMemoryCatalogService,
    InMemoryIdentityProvider, InMemoryOrderService, OrderService, RemoteCartService,
    ServiceError,
};
use state_framework::FileStore;
use std::sync::Arc;
use tracing::info;

/// The storefront runtime.
///
/// `ShopSystem` is responsible for:
/// - **Wiring**: one registry, one catalog, one cart session, one checkout, shared services
/// - **Identity**: binding the cart session to whoever signs in
/// - **Shutdown**: unbinding the cart so the local cart is the guest cart again
///
/// # Example
///
/// ```ignore
/// let system = ShopSystem::from_config(&ShopConfig::from_env()?)?;
///
/// let menu = system.menu().await?;
/// system.add_to_cart(LineItemSelection::new(&menu[1]).size("medium")).await?;
///
/// system.sign_up("ada@example.com", "Ada", "secret").await?;
/// let order = system.place_order(&request).await?;
///
/// system.shutdown().await?;
/// ```
pub struct ShopSystem {
    /// Factories the catalog is built from
    pub registry: MenuItemRegistry,

    /// Products and categories the menu is read from
    pub catalog: Arc<dyn CatalogService>,

    /// The active cart, local or bound to a remote cart
    pub session: CartSession,

    pub checkout: Checkout,

    pub identity: Arc<dyn IdentityProvider>,

    pub orders: Arc<dyn OrderService>,

    config: ShopConfig,
}

impl ShopSystem {
    /// Builds a system from `config` with in-memory collaborator services.
    ///
    /// This method:
    /// 1. Registers the default menu factories and seeds the catalog from them
    /// 2. Opens the local cart slot under `config.data_dir`
    /// 3. Creates in-memory cart, order and identity services
    /// 4. Binds the cart store and the remote cart service into a [`CartSession`]
    ///
    /// # Errors
    /// [`MenuError::FactoryNotFound`] if the default registry cannot build the catalog.
    pub fn from_config(config: &ShopConfig) -> Result<Self, MenuError> {
        let registry = MenuItemRegistry::with_defaults();
        let catalog: Arc<dyn CatalogService> =
            Arc::new(InMemoryCatalogService::seeded(&registry)?);
        let slot = Arc::new(FileStore::new(config.data_dir.clone()));
        let remote: Arc<dyn RemoteCartService> = Arc::new(InMemoryCartService::new());
        let orders: Arc<dyn OrderService> = Arc::new(InMemoryOrderService::new());
        let identity: Arc<dyn IdentityProvider> = Arc::new(InMemoryIdentityProvider::new());

        let store = CartStore::with_key(slot, config.cart_key.clone());
        Ok(Self::with_services(config, store, catalog, remote, orders, identity))
    }

    /// Builds a system around caller-supplied collaborators.
    ///
    /// # Arguments
    /// * `config` - Pricing and slot settings
    /// * `store` - Local cart store
    /// * `catalog` - Products and categories
    /// * `remote` - Remote cart persistence
    /// * `orders` - Order persistence
    /// * `identity` - Sign-in provider
    pub fn with_services(
        config: &ShopConfig,
        store: CartStore,
        catalog: Arc<dyn CatalogService>,
        remote: Arc<dyn RemoteCartService>,
        orders: Arc<dyn OrderService>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        info!(data_dir = %config.data_dir.display(), "Starting shop system");
        Self {
            registry: MenuItemRegistry::with_defaults(),
            catalog,
            session: CartSession::new(store, remote),
            checkout: Checkout::new(config.pricing.clone(), orders.clone()),
            identity,
            orders,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// The storefront menu, ordered by name.
    pub async fn menu(&self) -> Result<Vec<MenuItem>, ServiceError> {
        self.catalog.all_products().await
    }

    /// Resolves a selection and adds it to the cart.
    pub async fn add_to_cart(&self, selection: LineItemSelection<'_>) -> Result<(), MenuError> {
        let item = selection.into_line_item()?;
        self.session.add_item(item).await;
        Ok(())
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Creates an account, signs it in and binds the cart to it.
    pub async fn sign_up(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<(AppUser, CartMode), ServiceError> {
        let user = self.identity.sign_up(email, name, password).await?;
        let mode = self.session.sign_in(&user).await;
        Ok((user, mode))
    }

    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AppUser, CartMode), ServiceError> {
        let user = self.identity.sign_in(email, password).await?;
        let mode = self.session.sign_in(&user).await;
        Ok((user, mode))
    }

    pub async fn sign_out(&self) -> Result<(), ServiceError> {
        self.identity.sign_out().await?;
        self.session.sign_out().await;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Places an order for the signed-in user.
    ///
    /// # Errors
    /// [`CheckoutError::NotSignedIn`] when nobody is signed in, otherwise anything
    /// [`Checkout::place_order`] reports.
    pub async fn place_order(&self, request: &CheckoutRequest) -> Result<Order, CheckoutError> {
        let user = self
            .identity
            .current_user()
            .await
            .ok_or(CheckoutError::NotSignedIn)?;
        self.checkout.place_order(&self.session, &user, request).await
    }

    /// The signed-in user's orders, newest first.
    pub async fn order_history(&self) -> Result<Vec<Order>, CheckoutError> {
        let user = self
            .identity
            .current_user()
            .await
            .ok_or(CheckoutError::NotSignedIn)?;
        Ok(self.orders.user_orders(&user.id).await?)
    }

    pub async fn order_details(&self, order_id: &OrderId) -> Result<Order, CheckoutError> {
        let user = self
            .identity
            .current_user()
            .await
            .ok_or(CheckoutError::NotSignedIn)?;
        Ok(self.orders.order_details(order_id, &user.id).await?)
    }

    /// Unbinds the cart and signs out.
    ///
    /// A signed-in user's lines stay in their remote cart; the local store goes back to
    /// the guest cart held in the slot.
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the session is unbound
    /// - `Err(String)` if the identity provider failed to sign out
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down shop system...");

        self.session.sign_out().await;
        if self.identity.current_user().await.is_some() {
            self.identity.sign_out().await.map_err(|e| e.to_string())?;
        }

        info!(
            items = self.session.state().item_count,
            "Shop system shutdown complete."
        );
        Ok(())
    }
}
