//! CLI command implementations.

pub mod account;
pub mod browse;
pub mod order;

use kloudcart_client::shop::Shop;
use kloudcart_client::status::Severity;

/// Report the shop's last status message and fail the command on a failure
/// outcome.
pub(crate) fn report_status(shop: &Shop) -> Result<(), Box<dyn std::error::Error>> {
    let Some(status) = shop.status() else {
        return Ok(());
    };

    match status.severity() {
        Severity::Success => {
            tracing::info!("{status}");
            Ok(())
        }
        Severity::Failure => Err(status.text().to_string().into()),
    }
}
