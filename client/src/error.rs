//! Error types for setting up the booking API client

use thiserror::Error;

/// Errors raised while constructing the client.
///
/// Request failures are never reported through this type; they are
/// classified into [`eventapp_core::BookingError`] by the repository.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL could not be parsed
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl {
        /// Offending URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// The HTTP client could not be built (TLS backend, proxy settings)
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}
