//! Error taxonomy for booking operations.
//!
//! Every failure a caller can observe is a [`BookingError`] carrying one
//! [`ErrorKind`]. Callers choose messaging and session handling by matching on
//! the kind, never on the message text.

use std::fmt;
use thiserror::Error;

/// Result alias used across the booking client
pub type BookingResult<T> = Result<T, BookingError>;

/// Why the server rejected an action as a business-rule conflict
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConflictReason {
    /// The booking was already paid
    AlreadyPaid,
    /// The booking was already cancelled
    AlreadyCancelled,
    /// A per-user or per-event quota would be exceeded
    QuotaExceeded,
    /// Not enough inventory left for the requested tickets
    SoldOut,
    /// Conflict without a recognised reason
    Other,
}

impl ConflictReason {
    /// User-facing description of the reason
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AlreadyPaid => "This booking has already been paid",
            Self::AlreadyCancelled => "This booking has already been cancelled",
            Self::QuotaExceeded => "Requested tickets exceed the available quota",
            Self::SoldOut => "Not enough tickets left for this selection",
            Self::Other => "The booking could not be updated",
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AlreadyPaid => "already paid",
            Self::AlreadyCancelled => "already cancelled",
            Self::QuotaExceeded => "quota exceeded",
            Self::SoldOut => "sold out",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Closed set of failure kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Selection rejected before submission
    Validation,
    /// Action not permitted from the booking's current status
    InvalidBookingState,
    /// Another booking action is still outstanding
    ActionInProgress,
    /// HTTP 404
    NotFound,
    /// HTTP 403, the booking belongs to another user
    Forbidden,
    /// HTTP 401, the session must be re-established
    Unauthorized,
    /// Server-reported business-rule violation
    Conflict {
        /// Sub-reason derived from the server message
        reason: ConflictReason,
    },
    /// No response received
    NetworkUnavailable,
    /// HTTP 5xx
    ServerError,
    /// Anything else
    Unknown,
}

impl ErrorKind {
    /// Message used when the server did not provide one
    #[must_use]
    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::Validation => "The ticket selection is not valid",
            Self::InvalidBookingState => "This action is not available for the booking",
            Self::ActionInProgress => "Another booking action is still in progress",
            Self::NotFound => "Booking not found",
            Self::Forbidden => "You don't have access to this booking",
            Self::Unauthorized => "Your session has expired, please log in again",
            Self::Conflict { reason } => reason.description(),
            Self::NetworkUnavailable => "Connection failed. Please check your internet",
            Self::ServerError => "Server error, please try again later",
            Self::Unknown => "An error occurred",
        }
    }

    /// Returns true for kinds raised before any network call
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::Validation | Self::InvalidBookingState | Self::ActionInProgress
        )
    }

    /// Returns true if repeating the same request later may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkUnavailable | Self::ServerError)
    }

    /// Returns true if the caller should invalidate the session
    #[must_use]
    pub const fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => f.write_str("validation error"),
            Self::InvalidBookingState => f.write_str("invalid booking state"),
            Self::ActionInProgress => f.write_str("action in progress"),
            Self::NotFound => f.write_str("not found"),
            Self::Forbidden => f.write_str("forbidden"),
            Self::Unauthorized => f.write_str("unauthorized"),
            Self::Conflict { reason } => write!(f, "conflict ({reason})"),
            Self::NetworkUnavailable => f.write_str("network unavailable"),
            Self::ServerError => f.write_str("server error"),
            Self::Unknown => f.write_str("unknown error"),
        }
    }
}

/// A classified booking failure
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct BookingError {
    kind: ErrorKind,
    message: String,
}

impl BookingError {
    /// Creates an error with an explicit message
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an error carrying the kind's default message
    #[must_use]
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }

    /// Selection rejected before submission
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Transition not permitted from the current status
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidBookingState, message)
    }

    /// Another action is outstanding
    #[must_use]
    pub fn action_in_progress() -> Self {
        Self::from_kind(ErrorKind::ActionInProgress)
    }

    /// Failure kind
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Raw message, from the server when one was sent
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message to show the user.
    ///
    /// Conflicts with a recognised reason use the reason's wording; everything
    /// else uses the carried message.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self.kind {
            ErrorKind::Conflict { reason } if reason != ConflictReason::Other => {
                reason.description()
            }
            _ => &self.message,
        }
    }
}
