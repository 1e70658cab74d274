use coffee_shop::checkout::{time_slots, CheckoutRequest, FulfillmentOption};
use coffee_shop::config::ShopConfig;
use coffee_shop::lifecycle::ShopSystem;
use coffee_shop::menu::{find_item, LineItemSelection};
use coffee_shop::model::CartState;
use rust_decimal::Decimal;
use state_framework::tracing::setup_tracing;
use state_framework::ObserverHandle;
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ShopConfig::from_env().map_err(|e| e.to_string())?;
    info!(data_dir = %config.data_dir.display(), "Starting coffee shop");

    let system = ShopSystem::from_config(&config).map_err(|e| e.to_string())?;

    // Log every cart change the way a badge in the header would render it
    let badge: ObserverHandle<CartState> = Arc::new(|cart: &CartState| {
        info!(items = cart.item_count, subtotal = %cart.subtotal, "Cart updated");
    });
    system.session.subscribe(badge.clone());

    let menu = system.menu().await.map_err(|e| e.to_string())?;
    info!(count = menu.len(), "Menu loaded");

    let span = tracing::info_span!("browsing");
    async {
        let latte = find_item(&menu, "latte-1").ok_or("latte missing from menu")?;
        system
            .add_to_cart(
                LineItemSelection::new(latte)
                    .size("medium")
                    .option("oat-milk")
                    .quantity(2),
            )
            .await
            .map_err(|e| e.to_string())?;

        let cold_brew = find_item(&menu, "cold-brew-1").ok_or("cold brew missing from menu")?;
        system
            .add_to_cart(
                LineItemSelection::new(cold_brew)
                    .size("large")
                    .option("vanilla")
                    .option("extra-shot"),
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let (user, mode) = system
        .sign_up("alice@example.com", "Alice", "correct-horse")
        .await
        .map_err(|e| e.to_string())?;
    info!(user_id = %user.id, mode = ?mode, "Signed up");

    let slot = time_slots(chrono::Local::now().naive_local())
        .into_iter()
        .next()
        .ok_or("no time slots available")?;
    let request = CheckoutRequest::new(FulfillmentOption::Pickup)
        .scheduled_at(slot.value.clone())
        .with_tip(Decimal::new(200, 2));

    let quote = system.checkout.quote(system.session.state().subtotal, &request);
    info!(tax = %quote.tax, total = %quote.total, slot = %slot.label, "Checkout quote");

    let order = system
        .place_order(&request)
        .await
        .map_err(|e| e.to_string())?;
    info!(
        order_id = %order.id,
        items = order.item_count(),
        total = %order.total,
        "Order placed"
    );

    let history = system.order_history().await.map_err(|e| e.to_string())?;
    info!(orders = history.len(), "Order history");

    system.session.unsubscribe(&badge);
    system.shutdown().await?;

    info!("Application finished successfully");
    Ok(())
}
