//! Typed HTTP client for the pricebook REST API.
//!
//! Every endpoint answers with the `{success, data?, message?, error?}`
//! envelope; [`PricebookClient`] unwraps `data` on success and turns any
//! non-2xx into [`ClientError::Api`] carrying the envelope's `error`.

use async_trait::async_trait;
use pricebook_core::account::{AccountSummary, AccountView, SpecialPriceAccount};
use pricebook_core::catalog::{Product, ProductSummary};
use pricebook_core::requests::{CreateSpecialPrice, UpdateSpecialPrice};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ClientError, ClientResult, DEFAULT_ERROR_MESSAGE};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "PRICEBOOK_API_URL";

/// The response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Operations the presentation layer needs from the API.
///
/// [`PricebookClient`] is the HTTP implementation; view-state and form logic
/// only depend on this trait.
#[async_trait]
pub trait PricebookApi: Send + Sync {
    async fn list_products(&self) -> ClientResult<Vec<ProductSummary>>;

    async fn get_product(&self, sku: &str) -> ClientResult<Product>;

    async fn list_users(&self) -> ClientResult<Vec<AccountSummary>>;

    async fn get_special_prices(&self, email: &str) -> ClientResult<AccountView>;

    async fn create_special_price(
        &self,
        request: &CreateSpecialPrice,
    ) -> ClientResult<SpecialPriceAccount>;

    async fn update_special_price(
        &self,
        email: &str,
        request: &UpdateSpecialPrice,
    ) -> ClientResult<SpecialPriceAccount>;
}

/// HTTP client for a pricebook API server.
#[derive(Debug, Clone)]
pub struct PricebookClient {
    client: reqwest::Client,
    base_url: String,
}

impl PricebookClient {
    /// * `base_url` - API root including the version prefix, e.g.
    ///   `http://host:3000/api/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Client pointed at `PRICEBOOK_API_URL`, or the local default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint URL below the base, one percent-encoded path segment per
    /// entry of `segments`. A SKU or email containing `/`, `?` or `#` stays
    /// a single segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ---- private helpers ----

    /// Decode an envelope, mapping non-2xx statuses to [`ClientError::Api`].
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(&bytes)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes)?;
        envelope.data.ok_or(ClientError::MissingData)
    }
}

#[async_trait]
impl PricebookApi for PricebookClient {
    async fn list_products(&self) -> ClientResult<Vec<ProductSummary>> {
        let response = self.client.get(self.endpoint(&["products"])?).send().await?;
        Self::parse_response(response).await
    }

    async fn get_product(&self, sku: &str) -> ClientResult<Product> {
        let response = self
            .client
            .get(self.endpoint(&["products", sku])?)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_users(&self) -> ClientResult<Vec<AccountSummary>> {
        let response = self
            .client
            .get(self.endpoint(&["special-prices", "users"])?)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn get_special_prices(&self, email: &str) -> ClientResult<AccountView> {
        let response = self
            .client
            .get(self.endpoint(&["special-prices", email])?)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn create_special_price(
        &self,
        request: &CreateSpecialPrice,
    ) -> ClientResult<SpecialPriceAccount> {
        let response = self
            .client
            .post(self.endpoint(&["special-prices"])?)
            .json(request)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_special_price(
        &self,
        email: &str,
        request: &UpdateSpecialPrice,
    ) -> ClientResult<SpecialPriceAccount> {
        let response = self
            .client
            .put(self.endpoint(&["special-prices", email])?)
            .json(request)
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
