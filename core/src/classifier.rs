//! Maps raw API failures onto [`ErrorKind`].
//!
//! Classification is primarily by HTTP status. The backend has no structured
//! codes for the paid/cancelled/quota family, so 4xx responses other than
//! 401, 403 and 404 are refined by keyword matching on the message text.

use serde_json::Value;

use crate::error::{BookingError, ConflictReason, ErrorKind};

/// Fallback when no usable message is available
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Keywords checked in order; the first hit decides the reason
const CONFLICT_KEYWORDS: [(&str, ConflictReason); 6] = [
    ("already paid", ConflictReason::AlreadyPaid),
    ("cancelled", ConflictReason::AlreadyCancelled),
    ("canceled", ConflictReason::AlreadyCancelled),
    ("quota", ConflictReason::QuotaExceeded),
    ("stock", ConflictReason::QuotaExceeded),
    ("sold out", ConflictReason::SoldOut),
];

/// A failed API interaction, before classification
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureSignal {
    /// The server answered with a non-success status
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body, if any
        body: Option<String>,
    },
    /// No response was received
    Transport {
        /// Description of the I/O failure
        reason: String,
    },
}

/// Result of pulling a message out of an error body
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractedMessage {
    /// A non-empty `message` or `error` field
    Found(String),
    /// Valid object without a usable message, or no body at all
    Missing,
    /// Not a JSON object
    Malformed,
}

impl ExtractedMessage {
    /// Parses an error body. Never fails.
    #[must_use]
    pub fn from_body(body: Option<&str>) -> Self {
        let Some(body) = body.map(str::trim).filter(|b| !b.is_empty()) else {
            return Self::Missing;
        };

        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
            return Self::Malformed;
        };

        let non_empty = |value: Option<&Value>| {
            value
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
        };

        non_empty(map.get("message"))
            .or_else(|| non_empty(map.get("error")))
            .or_else(|| {
                map.get("error")
                    .and_then(Value::as_object)
                    .and_then(|inner| non_empty(inner.get("message")))
            })
            .map_or(Self::Missing, Self::Found)
    }

    /// The found message, if any
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        match self {
            Self::Found(message) => Some(message),
            Self::Missing | Self::Malformed => None,
        }
    }
}

/// Stateless classifier for booking API failures
#[derive(Clone, Copy, Debug, Default)]
pub struct BookingErrorClassifier;

impl BookingErrorClassifier {
    /// Classifies any failure signal
    #[must_use]
    pub fn classify(signal: &FailureSignal) -> BookingError {
        match signal {
            FailureSignal::Http { status, body } => Self::classify_http(*status, body.as_deref()),
            FailureSignal::Transport { reason } => Self::classify_transport(reason),
        }
    }

    /// Classifies a non-success HTTP response
    #[must_use]
    pub fn classify_http(status: u16, body: Option<&str>) -> BookingError {
        let extracted = ExtractedMessage::from_body(body);

        let with_message = |kind: ErrorKind, extracted: ExtractedMessage| {
            match extracted.into_message() {
                Some(message) => BookingError::new(kind, message),
                None => BookingError::from_kind(kind),
            }
        };

        match status {
            401 => with_message(ErrorKind::Unauthorized, extracted),
            403 => with_message(ErrorKind::Forbidden, extracted),
            404 => with_message(ErrorKind::NotFound, extracted),
            500..=599 => with_message(ErrorKind::ServerError, extracted),
            409 => {
                let message = extracted.into_message();
                let reason = message
                    .as_deref()
                    .and_then(Self::conflict_reason)
                    .unwrap_or(ConflictReason::Other);
                let kind = ErrorKind::Conflict { reason };
                match message {
                    Some(message) => BookingError::new(kind, message),
                    None => BookingError::from_kind(kind),
                }
            }
            400..=499 => match extracted {
                ExtractedMessage::Found(message) => Self::classify_rejection(&message),
                ExtractedMessage::Missing | ExtractedMessage::Malformed => {
                    BookingError::new(ErrorKind::Unknown, GENERIC_ERROR_MESSAGE)
                }
            },
            _ => BookingError::new(
                ErrorKind::Unknown,
                extracted
                    .into_message()
                    .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            ),
        }
    }

    /// Classifies a transport-level failure
    #[must_use]
    pub fn classify_transport(reason: &str) -> BookingError {
        tracing::debug!(reason, "Transport failure classified as network unavailable");
        BookingError::from_kind(ErrorKind::NetworkUnavailable)
    }

    /// Classifies a rejection message: a conflict if it names a known
    /// reason, otherwise `Unknown` carrying the message
    #[must_use]
    pub fn classify_rejection(message: &str) -> BookingError {
        let kind = Self::conflict_reason(message)
            .map_or(ErrorKind::Unknown, |reason| ErrorKind::Conflict { reason });
        BookingError::new(kind, message)
    }

    /// Finds the conflict reason named by a message, case-insensitively
    #[must_use]
    pub fn conflict_reason(message: &str) -> Option<ConflictReason> {
        let lowered = message.to_lowercase();
        CONFLICT_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, reason)| *reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> BookingError {
        BookingErrorClassifier::classify(&FailureSignal::Http {
            status,
            body: Some(body.to_string()),
        })
    }

    #[test]
    fn test_already_paid_is_conflict() {
        let error = http(400, r#"{"message":"Booking already paid"}"#);
        assert_eq!(
            error.kind(),
            ErrorKind::Conflict {
                reason: ConflictReason::AlreadyPaid
            }
        );
        assert_eq!(error.message(), "Booking already paid");
    }

    #[test]
    fn test_keyword_refinement() {
        let cases = [
            ("Booking has been cancelled", ConflictReason::AlreadyCancelled),
            ("Booking was canceled", ConflictReason::AlreadyCancelled),
            ("quota exceeded", ConflictReason::QuotaExceeded),
            ("Insufficient STOCK for ticket 3", ConflictReason::QuotaExceeded),
            ("VIP is sold out", ConflictReason::SoldOut),
        ];
        for (message, reason) in cases {
            let body = serde_json::json!({ "message": message }).to_string();
            assert_eq!(http(400, &body).kind(), ErrorKind::Conflict { reason }, "{message}");
        }
    }

    #[test]
    fn test_other_client_errors_are_refined() {
        let error = http(422, r#"{"message":"quota exceeded"}"#);
        assert_eq!(
            error.kind(),
            ErrorKind::Conflict {
                reason: ConflictReason::QuotaExceeded
            }
        );
        assert_eq!(http(422, "<html>").message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(http(429, r#"{"message":"slow down"}"#).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_stock_shares_quota_wording() {
        let error = http(400, r#"{"message":"Insufficient stock"}"#);
        assert_eq!(error.user_message(), ConflictReason::QuotaExceeded.description());
    }

    #[test]
    fn test_error_field_used_when_message_missing() {
        let error = http(400, r#"{"error":"Ticket quota reached"}"#);
        assert_eq!(
            error.kind(),
            ErrorKind::Conflict {
                reason: ConflictReason::QuotaExceeded
            }
        );
        assert_eq!(error.message(), "Ticket quota reached");

        let nested = http(400, r#"{"error":{"message":"already paid"}}"#);
        assert_eq!(nested.message(), "already paid");
    }

    #[test]
    fn test_plain_bad_request_is_unknown_with_message() {
        let error = http(400, r#"{"message":"Invalid ticket id"}"#);
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.message(), "Invalid ticket id");
    }

    #[test]
    fn test_malformed_body_degrades_to_unknown() {
        let error = http(400, "<html>Bad Request</html>");
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.message(), GENERIC_ERROR_MESSAGE);

        let array = http(400, r#"["already paid"]"#);
        assert_eq!(array.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(http(404, "").kind(), ErrorKind::NotFound);
        assert_eq!(http(404, "").message(), "Booking not found");
        assert_eq!(http(403, "{}").kind(), ErrorKind::Forbidden);
        assert_eq!(http(401, "not json").kind(), ErrorKind::Unauthorized);
        assert_eq!(http(500, "").kind(), ErrorKind::ServerError);
        assert_eq!(http(503, r#"{"message":"down"}"#).message(), "down");
        assert_eq!(http(418, r#"{"message":"teapot"}"#).kind(), ErrorKind::Unknown);
        assert_eq!(http(418, r#"{"message":"teapot"}"#).message(), "teapot");
    }

    #[test]
    fn test_conflict_status_without_keyword() {
        let error = http(409, r#"{"message":"Booking locked"}"#);
        assert_eq!(
            error.kind(),
            ErrorKind::Conflict {
                reason: ConflictReason::Other
            }
        );
    }

    #[test]
    fn test_transport_failure_is_network_unavailable() {
        let error = BookingErrorClassifier::classify(&FailureSignal::Transport {
            reason: "operation timed out".to_string(),
        });
        assert_eq!(error.kind(), ErrorKind::NetworkUnavailable);
    }

    #[test]
    fn test_missing_body() {
        let error = BookingErrorClassifier::classify_http(400, None);
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.message(), GENERIC_ERROR_MESSAGE);
    }
}
