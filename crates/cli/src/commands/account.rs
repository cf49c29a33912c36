//! Account management commands.

use kloudcart_client::shop::Shop;

use super::report_status;

/// Create an account. Registering does not authenticate.
///
/// # Errors
///
/// Returns an error when the server rejects the registration; the message
/// carries the server-provided reason when one was supplied.
pub async fn register(
    shop: &Shop,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    shop.register(username, password).await;
    report_status(shop)
}
