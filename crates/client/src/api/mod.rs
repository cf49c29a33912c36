//! Shop API client implementation.
//!
//! A thin JSON-over-HTTP client (`reqwest`) for the KloudCart backend. The
//! server is the source of truth for catalog and orders; this client does no
//! retrying and no caching of its own.
//!
//! # Endpoints
//!
//! - `GET /vegetables` - catalog listing
//! - `POST /auth/register` - account creation (does not authenticate)
//! - `POST /auth/login` - returns `{access_token}`
//! - `POST /orders` - bearer-authorized order placement
//!
//! Rejected requests may carry a JSON body `{msg}`; the message is surfaced
//! through [`ApiError::Rejected`].

mod error;
pub mod types;

pub use error::{ApiError, ErrorBody};

use std::sync::Arc;

use tracing::{debug, instrument};

use kloudcart_core::SessionToken;

use crate::config::ClientConfig;
use types::{Credentials, LoginResponse, OrderRequest, Vegetable};

/// Client for the KloudCart shop API.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct KloudClient {
    inner: Arc<KloudClientInner>,
}

struct KloudClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl KloudClient {
    /// Create a new shop API client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let base_url = config.api_url.as_str().trim_end_matches('/').to_string();

        Self {
            inner: Arc::new(KloudClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Fetch the full vegetable catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list_vegetables(&self) -> Result<Vec<Vegetable>, ApiError> {
        let response = self
            .inner
            .client
            .get(format!("{}/vegetables", self.inner.base_url))
            .send()
            .await?;

        decode(response).await
    }

    /// Create an account.
    ///
    /// Registering does not authenticate; call [`Self::login`] afterwards.
    /// The success body is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(format!("{}/auth/register", self.inner.base_url))
            .json(&Credentials { username, password })
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Exchange credentials for a session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server rejects the
    /// credentials, or the response cannot be decoded.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionToken, ApiError> {
        let response = self
            .inner
            .client
            .post(format!("{}/auth/login", self.inner.base_url))
            .json(&Credentials { username, password })
            .send()
            .await?;

        let login: LoginResponse = decode(response).await?;
        Ok(SessionToken::new(login.access_token))
    }

    /// Submit an order under the given session.
    ///
    /// The success body is ignored. No idempotency key is attached; a failed
    /// submission that actually succeeded server-side can be resubmitted by
    /// the user, placing a duplicate order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self, token, order), fields(lines = order.items.len()))]
    pub async fn place_order(
        &self,
        token: &SessionToken,
        order: &OrderRequest,
    ) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(format!("{}/orders", self.inner.base_url))
            .bearer_auth(token.expose())
            .json(order)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}

/// Convert a non-success response into [`ApiError::Rejected`], reading the
/// optional `{msg}` error body.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body).ok().map(|b| b.msg);
    debug!(status = %status, message = ?message, "shop API rejected request");

    Err(ApiError::Rejected { status, message })
}

/// Decode a JSON success body, surfacing rejections first.
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let response = check(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn client() -> KloudClient {
        let url = Url::parse("http://127.0.0.1:5000/").expect("valid url");
        KloudClient::new(&ClientConfig::new(url))
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client();
        assert_eq!(client.inner.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_kloud_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<KloudClient>();
    }

    #[test]
    fn test_kloud_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KloudClient>();
    }
}
