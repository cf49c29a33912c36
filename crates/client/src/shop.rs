//! Storefront coordinator: the in-memory client-state core.
//!
//! [`Shop`] owns the four pieces of client state (inventory snapshot,
//! session token, cart, most recent status message) and drives every call
//! to the remote shop API. API failures never escape the coordinator; each
//! user-triggered operation leaves its outcome in the status channel.
//!
//! # Concurrency
//!
//! `Shop` is cheaply cloneable (`Arc` inner) and safe to call from
//! concurrent tasks. State sits behind a mutex that is never held across an
//! await point, so network results are applied in arrival order. Overlapping
//! triggers of the *same* action (e.g. a double-click login) are rejected by
//! an in-flight guard without touching state or the network; distinct
//! actions may still interleave, last writer wins. The inventory refresh
//! that follows a successful checkout is a consequence of the checkout,
//! not a user trigger, and is exempt from the guard.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument, warn};

use kloudcart_core::{Price, SessionToken};

use crate::api::types::Vegetable;
use crate::api::{ApiError, KloudClient};
use crate::cart::{Cart, CartLine};
use crate::config::ClientConfig;
use crate::status::StatusMessage;

/// Network-backed actions guarded against overlapping triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Action {
    Refresh,
    Register,
    Login,
    PlaceOrder,
}

/// The client-state core for one shopping session.
///
/// Cheaply cloneable; all clones share the same state and API client.
#[derive(Clone)]
pub struct Shop {
    inner: Arc<ShopInner>,
}

struct ShopInner {
    api: KloudClient,
    state: Mutex<ShopState>,
    in_flight: Mutex<HashSet<Action>>,
}

#[derive(Default)]
struct ShopState {
    inventory: Vec<Vegetable>,
    loading: bool,
    session: Option<SessionToken>,
    cart: Cart,
    status: Option<StatusMessage>,
}

/// Marks an action in flight; removed again on drop.
struct InFlight<'a> {
    in_flight: &'a Mutex<HashSet<Action>>,
    action: Action,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.in_flight).remove(&self.action);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shop {
    /// Create a shop talking to the API named by `config`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(KloudClient::new(config))
    }

    /// Build a shop around an existing API client.
    #[must_use]
    pub fn with_client(api: KloudClient) -> Self {
        Self {
            inner: Arc::new(ShopInner {
                api,
                state: Mutex::new(ShopState::default()),
                in_flight: Mutex::new(HashSet::new()),
            }),
        }
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// The last-fetched inventory snapshot.
    #[must_use]
    pub fn inventory(&self) -> Vec<Vegetable> {
        lock(&self.inner.state).inventory.clone()
    }

    /// Whether an inventory fetch is currently running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.inner.state).loading
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn cart_lines(&self) -> Vec<CartLine> {
        lock(&self.inner.state).cart.lines().to_vec()
    }

    /// Sum of cart line totals.
    #[must_use]
    pub fn cart_subtotal(&self) -> Price {
        lock(&self.inner.state).cart.subtotal()
    }

    /// The most recent status message, if any operation has run yet.
    #[must_use]
    pub fn status(&self) -> Option<StatusMessage> {
        lock(&self.inner.state).status.clone()
    }

    /// The active session token, if logged in.
    #[must_use]
    pub fn session_token(&self) -> Option<SessionToken> {
        lock(&self.inner.state).session.clone()
    }

    /// Whether a session token is held.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        lock(&self.inner.state).session.is_some()
    }

    // =========================================================================
    // Local operations (pure, synchronous)
    // =========================================================================

    /// Append the vegetable to the cart with quantity 1.
    ///
    /// Adding the same vegetable twice appends a second line; see
    /// [`Cart`](crate::cart::Cart) for the multi-line policy.
    pub fn add_to_cart(&self, vegetable: &Vegetable) {
        lock(&self.inner.state).cart.add(vegetable);
    }

    /// Clear the session token locally. No network call is involved.
    pub fn logout(&self) {
        let mut state = lock(&self.inner.state);
        state.session = None;
        state.status = Some(StatusMessage::success("You have been logged out."));
    }

    // =========================================================================
    // Network-backed operations
    // =========================================================================
    //
    // Each returns `false` when an identical action was already in flight
    // and the trigger was rejected; `true` means the operation ran and its
    // outcome is observable through the accessors above.

    /// Fetch the catalog and replace the inventory snapshot wholesale.
    ///
    /// On failure the previous snapshot is kept and the error is only
    /// logged; the status channel is not touched.
    #[must_use = "a rejected trigger fetches nothing"]
    #[instrument(skip(self))]
    pub async fn refresh_inventory(&self) -> bool {
        let Some(_guard) = self.begin(Action::Refresh) else {
            return false;
        };

        self.fetch_inventory().await;
        true
    }

    /// Fetch and apply the catalog, unguarded. Shared by the user-triggered
    /// refresh and the refresh that follows a successful checkout.
    async fn fetch_inventory(&self) {
        lock(&self.inner.state).loading = true;
        let result = self.inner.api.list_vegetables().await;

        let mut state = lock(&self.inner.state);
        state.loading = false;
        match result {
            Ok(vegetables) => {
                debug!(count = vegetables.len(), "inventory snapshot replaced");
                state.inventory = vegetables;
            }
            Err(err) => {
                // Snapshot left stale; no user-visible message for this path.
                warn!(error = %err, "failed to refresh inventory");
            }
        }
    }

    /// Create an account. Registering does not authenticate.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn register(&self, username: &str, password: &str) -> bool {
        let Some(_guard) = self.begin(Action::Register) else {
            return false;
        };

        let status = match self.inner.api.register(username, password).await {
            Ok(()) => StatusMessage::success("Registered! You can log in now."),
            Err(err) => failure_status(&err),
        };
        lock(&self.inner.state).status = Some(status);
        true
    }

    /// Exchange credentials for a session token.
    ///
    /// On success any prior token is overwritten; on failure the prior
    /// token, if any, is kept.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let Some(_guard) = self.begin(Action::Login) else {
            return false;
        };

        match self.inner.api.login(username, password).await {
            Ok(token) => {
                let mut state = lock(&self.inner.state);
                state.session = Some(token);
                state.status = Some(StatusMessage::success("Logged in!"));
            }
            Err(err) => {
                lock(&self.inner.state).status = Some(failure_status(&err));
            }
        }
        true
    }

    /// Convert the cart into an order and reconcile local state.
    ///
    /// Requires a session token; without one no network call is issued and a
    /// failure status asks the user to log in. On success the cart is
    /// cleared and one inventory refresh is triggered; on failure the cart
    /// is left untouched (the order is not assumed to have partially
    /// succeeded).
    #[instrument(skip(self))]
    pub async fn place_order(&self) -> bool {
        let Some(_guard) = self.begin(Action::PlaceOrder) else {
            return false;
        };

        // Precondition check, not a server round trip.
        let (token, order) = {
            let mut state = lock(&self.inner.state);
            let Some(token) = state.session.clone() else {
                state.status = Some(StatusMessage::failure("Please login first!"));
                return true;
            };
            (token, state.cart.order_request())
        };

        match self.inner.api.place_order(&token, &order).await {
            Ok(()) => {
                {
                    let mut state = lock(&self.inner.state);
                    state.status = Some(StatusMessage::success("Order placed successfully!"));
                    state.cart.clear();
                }
                // Not a user trigger; must run even while a user-triggered
                // refresh is still in flight.
                self.fetch_inventory().await;
            }
            Err(err) => {
                lock(&self.inner.state).status = Some(failure_status(&err));
            }
        }
        true
    }

    /// Mark `action` in flight, or reject the trigger if it already is.
    fn begin(&self, action: Action) -> Option<InFlight<'_>> {
        let mut in_flight = lock(&self.inner.in_flight);
        if in_flight.insert(action) {
            Some(InFlight {
                in_flight: &self.inner.in_flight,
                action,
            })
        } else {
            debug!(?action, "identical action already in flight, trigger rejected");
            None
        }
    }
}

/// Phrase an API failure for the status channel.
///
/// Server-provided text wins; everything else collapses to a short generic
/// fallback so connection internals are not shown to the user.
fn failure_status(error: &ApiError) -> StatusMessage {
    let text = match error {
        ApiError::Rejected {
            message: Some(msg), ..
        } => msg.clone(),
        ApiError::Rejected { message: None, .. } | ApiError::Decode(_) => "Error".to_string(),
        ApiError::Http(_) => "Network error".to_string(),
    };
    StatusMessage::failure(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::status::Severity;
    use kloudcart_core::{Price, VegetableId};
    use rust_decimal::Decimal;
    use url::Url;

    fn shop() -> Shop {
        // Network-free tests only; the address is never dialed.
        let url = Url::parse("http://127.0.0.1:5000").unwrap();
        Shop::new(&ClientConfig::new(url))
    }

    fn vegetable(id: i64) -> Vegetable {
        Vegetable {
            id: VegetableId::new(id),
            name: format!("veg-{id}"),
            description: String::new(),
            price: Price::new(Decimal::from(30)).unwrap(),
            stock: 5,
        }
    }

    #[test]
    fn test_add_to_cart_appends_lines() {
        let shop = shop();
        shop.add_to_cart(&vegetable(1));
        shop.add_to_cart(&vegetable(1));
        shop.add_to_cart(&vegetable(2));

        let lines = shop.cart_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.quantity == 1));
        assert_eq!(shop.cart_subtotal().amount(), Decimal::from(90));
    }

    #[tokio::test]
    async fn test_place_order_without_session_sets_login_failure() {
        let shop = shop();
        shop.add_to_cart(&vegetable(1));

        assert!(shop.place_order().await);

        let status = shop.status().expect("status set");
        assert_eq!(status.severity(), Severity::Failure);
        assert_eq!(status.to_string(), "❌ Please login first!");
        // Cart untouched, no refresh attempted
        assert_eq!(shop.cart_lines().len(), 1);
        assert!(!shop.is_loading());
    }

    #[test]
    fn test_logout_clears_session_and_reports() {
        let shop = shop();
        lock(&shop.inner.state).session = Some(SessionToken::new("tok123"));
        assert!(shop.is_logged_in());

        shop.logout();

        assert!(!shop.is_logged_in());
        assert_eq!(
            shop.status().expect("status set").to_string(),
            "✅ You have been logged out."
        );
    }

    #[test]
    fn test_in_flight_guard_rejects_overlap_and_resets_on_drop() {
        let shop = shop();

        let guard = shop.begin(Action::Login).expect("first trigger accepted");
        assert!(shop.begin(Action::Login).is_none());
        // A distinct action is unaffected
        assert!(shop.begin(Action::Refresh).is_some());

        drop(guard);
        assert!(shop.begin(Action::Login).is_some());
    }

    #[test]
    fn test_failure_status_prefers_server_message() {
        let err = ApiError::Rejected {
            status: reqwest::StatusCode::CONFLICT,
            message: Some("user exists".to_string()),
        };
        assert_eq!(failure_status(&err).to_string(), "❌ user exists");

        let err = ApiError::Rejected {
            status: reqwest::StatusCode::BAD_GATEWAY,
            message: None,
        };
        assert_eq!(failure_status(&err).to_string(), "❌ Error");
    }

    #[test]
    fn test_shop_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<Shop>();
        assert_send_sync::<Shop>();
    }
}
