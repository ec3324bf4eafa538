//! Booking repository: envelope decoding and error classification over a
//! [`BookingApi`].

use crate::{
    api::{ApiOutcome, BookingApi},
    envelope::Envelope,
};
use eventapp_core::{
    Booking, BookingDetail, BookingError, BookingErrorClassifier, BookingId, BookingRequest,
    BookingResult, ErrorKind, GENERIC_ERROR_MESSAGE,
};
use serde::de::DeserializeOwned;

/// Typed access to the booking endpoints.
///
/// Every failure path (transport, non-2xx, `success: false`, undecodable
/// body) comes back as a classified [`BookingError`].
#[derive(Clone, Debug)]
pub struct BookingRepository<A> {
    api: A,
}

impl<A: BookingApi> BookingRepository<A> {
    /// Wraps an API implementation
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying API
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Creates a booking
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `POST /bookings`.
    pub async fn create(&self, request: BookingRequest) -> BookingResult<Booking> {
        let outcome = self.api.create_booking(request).await;
        decode_required(outcome, "create")
    }

    /// Lists the caller's bookings. Absent or empty data is an empty list.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `GET /bookings/me`.
    pub async fn list_mine(&self) -> BookingResult<Vec<Booking>> {
        let outcome = self.api.my_bookings().await;
        Ok(decode::<Vec<Booking>>(outcome, "list_mine")?.unwrap_or_default())
    }

    /// Fetches a booking with its payment details
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `GET /bookings/{id}`.
    pub async fn detail(&self, booking_id: BookingId) -> BookingResult<BookingDetail> {
        let outcome = self.api.booking_detail(booking_id).await;
        decode_required(outcome, "detail")
    }

    /// Pays a booking
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `POST /bookings/{id}/pay`.
    pub async fn pay(&self, booking_id: BookingId) -> BookingResult<BookingDetail> {
        let outcome = self.api.pay_booking(booking_id).await;
        decode_required(outcome, "pay")
    }

    /// Cancels a booking
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `POST /bookings/{id}/cancel`.
    pub async fn cancel(&self, booking_id: BookingId) -> BookingResult<Booking> {
        let outcome = self.api.cancel_booking(booking_id).await;
        decode_required(outcome, "cancel")
    }
}

fn decode_required<T: DeserializeOwned>(outcome: ApiOutcome, operation: &'static str) -> BookingResult<T> {
    decode(outcome, operation)?.ok_or_else(|| {
        failed(operation, BookingError::new(ErrorKind::Unknown, "empty response"))
    })
}

fn decode<T: DeserializeOwned>(outcome: ApiOutcome, operation: &'static str) -> BookingResult<Option<T>> {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => return Err(failed(operation, BookingErrorClassifier::classify_transport(&e.reason))),
    };

    if !response.is_success() {
        let error = BookingErrorClassifier::classify_http(response.status, Some(&response.body));
        return Err(failed(operation, error));
    }

    // 204 and other bodiless successes carry no data
    if response.body.trim().is_empty() {
        return Ok(None);
    }

    let envelope: Envelope<T> = serde_json::from_str(&response.body).map_err(|e| {
        tracing::debug!(operation, error = %e, "Undecodable booking API body");
        failed(operation, BookingError::new(ErrorKind::Unknown, "malformed response"))
    })?;

    if !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        return Err(failed(operation, BookingErrorClassifier::classify_rejection(&message)));
    }

    Ok(envelope.data)
}

fn failed(operation: &'static str, error: BookingError) -> BookingError {
    tracing::warn!(operation, kind = %error.kind(), message = error.message(), "Booking API call failed");
    error
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::{RawResponse, TransportError};
    use eventapp_core::{BookingStatus, ConflictReason};

    const BOOKING: &str = r#"{
        "bookingId": 42,
        "eventTitle": "Jazz Night",
        "items": [{"ticketId": 1, "ticketName": "VIP", "quantity": 2, "price": 100000, "subtotal": 200000}],
        "totalPrice": 200000,
        "status": "PENDING",
        "createdAt": "2026-01-01T10:00:00"
    }"#;

    fn ok(body: String) -> ApiOutcome {
        Ok(RawResponse::new(200, body))
    }

    #[test]
    fn test_decodes_booking() {
        let body = format!(r#"{{"success": true, "message": "OK", "data": {BOOKING}}}"#);
        let booking: Booking = decode_required(ok(body), "create").unwrap();
        assert_eq!(booking.booking_id, BookingId::new(42));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_tickets(), 2);
    }

    #[test]
    fn test_missing_data_is_unknown() {
        let error = decode_required::<Booking>(ok(r#"{"success": true, "data": null}"#.into()), "detail")
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.message(), "empty response");
    }

    #[test]
    fn test_bodiless_success_has_no_data() {
        let listed = decode::<Vec<Booking>>(Ok(RawResponse::new(204, "")), "list_mine").unwrap();
        assert_eq!(listed, None);

        let error = decode_required::<Booking>(Ok(RawResponse::new(200, "  ")), "detail").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.message(), "empty response");
    }

    #[test]
    fn test_undecodable_body_is_unknown() {
        let error = decode_required::<Booking>(ok("<html>".into()), "detail").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.message(), "malformed response");
    }

    #[test]
    fn test_rejected_envelope_is_refined() {
        let body = r#"{"success": false, "message": "Ticket sold out"}"#.to_string();
        let error = decode_required::<Booking>(ok(body), "create").unwrap_err();
        assert_eq!(
            error.kind(),
            ErrorKind::Conflict {
                reason: ConflictReason::SoldOut
            }
        );
    }

    #[test]
    fn test_rejected_envelope_without_keyword_is_unknown() {
        let body = r#"{"success": false, "message": "Something odd"}"#.to_string();
        let error = decode_required::<Booking>(ok(body), "create").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.message(), "Something odd");
    }

    #[test]
    fn test_http_status_is_classified() {
        let outcome = Ok(RawResponse::new(404, r#"{"message": "Booking not found"}"#));
        let error = decode_required::<Booking>(outcome, "detail").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), "Booking not found");
    }

    #[test]
    fn test_transport_failure_is_network_unavailable() {
        let outcome = Err(TransportError::new("connection refused"));
        let error = decode_required::<Booking>(outcome, "pay").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NetworkUnavailable);
    }
}
