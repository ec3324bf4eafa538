//! Transport seam for the booking API.
//!
//! [`BookingApi`] is the raw HTTP surface: one method per endpoint,
//! returning the status and body as received. Decoding the envelope and
//! classifying failures is the repository's job, so any implementation
//! (reqwest, a stub, a recording proxy) gets identical error handling.

use eventapp_core::{BookingId, BookingRequest};
use std::future::Future;
use thiserror::Error;

/// A response as received, before envelope decoding
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body text, possibly empty
    pub body: String,
}

impl RawResponse {
    /// Creates a response
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// No response was received
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("transport failure: {reason}")]
pub struct TransportError {
    /// Description of the I/O failure
    pub reason: String,
}

impl TransportError {
    /// Creates a transport error
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Outcome of a single API call
pub type ApiOutcome = Result<RawResponse, TransportError>;

/// The five booking endpoints under `/api/v1`.
///
/// Implementations attach authentication themselves and must not retry.
pub trait BookingApi: Send + Sync {
    /// `POST /bookings`
    fn create_booking(&self, request: BookingRequest) -> impl Future<Output = ApiOutcome> + Send;

    /// `GET /bookings/me`
    fn my_bookings(&self) -> impl Future<Output = ApiOutcome> + Send;

    /// `GET /bookings/{id}`
    fn booking_detail(&self, booking_id: BookingId) -> impl Future<Output = ApiOutcome> + Send;

    /// `POST /bookings/{id}/pay`
    fn pay_booking(&self, booking_id: BookingId) -> impl Future<Output = ApiOutcome> + Send;

    /// `POST /bookings/{id}/cancel`
    fn cancel_booking(&self, booking_id: BookingId) -> impl Future<Output = ApiOutcome> + Send;
}
