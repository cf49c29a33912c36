//! Catalog browsing command.

use kloudcart_client::shop::Shop;

/// Fetch the catalog and print it.
///
/// A refresh failure leaves the (empty) startup snapshot in place, so an
/// empty listing is reported rather than an error.
///
/// # Errors
///
/// Currently infallible.
#[allow(clippy::unnecessary_wraps)]
pub async fn run(shop: &Shop) -> Result<(), Box<dyn std::error::Error>> {
    // Single-task flow; the trigger cannot be rejected as a duplicate
    let _ = shop.refresh_inventory().await;

    let inventory = shop.inventory();
    if inventory.is_empty() {
        tracing::info!("No vegetables available.");
        return Ok(());
    }

    tracing::info!("Available vegetables:");
    for vegetable in &inventory {
        tracing::info!(
            "  [{}] {} - {} (stock: {})",
            vegetable.id,
            vegetable.name,
            vegetable.price,
            vegetable.stock
        );
        if !vegetable.description.is_empty() {
            tracing::info!("      {}", vegetable.description);
        }
    }
    Ok(())
}
