//! reqwest-backed implementation of [`BookingApi`]

use crate::{
    api::{ApiOutcome, BookingApi, RawResponse, TransportError},
    config::ClientConfig,
    error::ClientError,
    token::TokenProvider,
};
use eventapp_core::{BookingId, BookingRequest};
use reqwest::{Client, RequestBuilder, Url, header};
use std::sync::Arc;

/// HTTP client for the booking endpoints
#[derive(Clone)]
pub struct HttpBookingApi {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for HttpBookingApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBookingApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpBookingApi {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if the configured URL does not
    /// parse, or `ClientError::HttpClientInit` if reqwest cannot build its
    /// client.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ClientError> {
        Url::parse(&config.base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ClientError::HttpClientInit(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Create a client for `base_url` with default timeouts
    ///
    /// # Errors
    ///
    /// Same as [`HttpBookingApi::new`].
    pub fn with_base_url(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ClientError> {
        Self::new(&ClientConfig::new(base_url), tokens)
    }

    /// API root this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(header::ACCEPT, "application/json");
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, method: &'static str, url: String, builder: RequestBuilder) -> ApiOutcome {
        tracing::debug!(method, url = %url, "Sending booking API request");

        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(method, url = %url, error = %e, "Booking API request failed");
                TransportError::new(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(format!("failed to read response body: {e}")))?;

        tracing::debug!(method, url = %url, status, "Booking API response received");
        Ok(RawResponse::new(status, body))
    }
}

impl BookingApi for HttpBookingApi {
    async fn create_booking(&self, request: BookingRequest) -> ApiOutcome {
        let url = self.endpoint("/bookings");
        let builder = self.client.post(&url).json(&request);
        self.execute("POST", url, builder).await
    }

    async fn my_bookings(&self) -> ApiOutcome {
        let url = self.endpoint("/bookings/me");
        let builder = self.client.get(&url);
        self.execute("GET", url, builder).await
    }

    async fn booking_detail(&self, booking_id: BookingId) -> ApiOutcome {
        let url = self.endpoint(&format!("/bookings/{booking_id}"));
        let builder = self.client.get(&url);
        self.execute("GET", url, builder).await
    }

    async fn pay_booking(&self, booking_id: BookingId) -> ApiOutcome {
        let url = self.endpoint(&format!("/bookings/{booking_id}/pay"));
        let builder = self.client.post(&url);
        self.execute("POST", url, builder).await
    }

    async fn cancel_booking(&self, booking_id: BookingId) -> ApiOutcome {
        let url = self.endpoint(&format!("/bookings/{booking_id}/cancel"));
        let builder = self.client.post(&url);
        self.execute("POST", url, builder).await
    }
}
