//! # Backend API Client
//!
//! The two HTTP calls a checkout session needs, and nothing else:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Backend Contract                                  │
//! │                                                                         │
//! │  GET  {base}/products   → Vec<Product>   once per session              │
//! │  PUT  {base}/billing    ← Vec<OrderLine> on finalize                   │
//! │                                                                         │
//! │  No retries, no cancellation: a call either resolves or rejects, and   │
//! │  a rejection is reported to the operator without touching the cart.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use boutique_core::catalog::{Catalog, Product};
use boutique_core::order::OrderLine;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::OrderSubmitter;

// =============================================================================
// Api Client
// =============================================================================

/// HTTP client for the admin backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Builds a client from the terminal configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        // Trailing slash so Url::join appends instead of replacing the
        // last path segment
        let mut base = config.backend.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.backend.timeout_secs))
            .build()?;

        Ok(ApiClient {
            http,
            base_url,
            auth_token: config.backend.auth_token.clone(),
        })
    }

    /// Fetches the product catalog (`GET /products`).
    ///
    /// Called once per session. On failure the caller keeps an empty
    /// catalog and reports the degraded mode to the operator; this
    /// method only surfaces the error.
    pub async fn fetch_catalog(&self) -> ClientResult<Catalog> {
        let url = self.base_url.join("products")?;
        debug!(%url, "fetching catalog");

        let mut request = self.http.get(url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "catalog fetch rejected by backend");
            return Err(ClientError::Backend {
                status: status.as_u16(),
            });
        }

        let products: Vec<Product> = response.json().await?;
        let catalog = Catalog::new(products);
        // A negative price off the wire would flow into the billing
        // math; refuse the snapshot rather than sell from it
        catalog.validate_prices()?;
        info!(products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Submits a finalized order (`PUT /billing`).
    ///
    /// The body is exactly the order's line array; subtotal/tax/total
    /// stay client-side for the receipt, the backend recomputes its own
    /// books from the lines.
    pub async fn submit_order(&self, lines: &[OrderLine]) -> ClientResult<()> {
        let url = self.base_url.join("billing")?;
        debug!(%url, lines = lines.len(), "submitting order");

        let mut request = self.http.put(url).json(lines);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "order submission rejected by backend");
            return Err(ClientError::Backend {
                status: status.as_u16(),
            });
        }

        info!(lines = lines.len(), "order submitted");
        Ok(())
    }
}

/// The session's submission seam; see [`crate::session::OrderSubmitter`].
#[async_trait]
impl OrderSubmitter for ApiClient {
    async fn submit(&self, lines: &[OrderLine]) -> ClientResult<()> {
        self.submit_order(lines).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
