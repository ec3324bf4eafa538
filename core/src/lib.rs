//! # Eventapp Core
//!
//! Booking domain for the event booking client.
//!
//! This crate has no I/O. It holds the rules that decide whether a ticket
//! selection may be submitted and whether a booking may be paid or
//! cancelled, plus the classification of API failures into a closed set of
//! error kinds.
//!
//! ## Core Concepts
//!
//! - **`TicketSelectionSet`**: immutable snapshot of per-ticket quantities,
//!   capped at ten tickets per booking
//! - **`BookingRequestBuilder`**: the only way to produce a `BookingRequest`
//! - **Lifecycle guards**: `PENDING → PAID | CANCELLED`, nothing else
//! - **`BookingErrorClassifier`**: HTTP status + body → `ErrorKind`
//! - **`Resource`**: loading / success / error state for the UI
//!
//! ## Example
//!
//! ```
//! use eventapp_core::{
//!     BookingRequestBuilder, EventId, Money, Ticket, TicketId, TicketSelectionSet,
//! };
//!
//! let regular = Ticket::new(TicketId::new(1), "Regular", Money::from_minor_units(10_000_000), 2);
//! let selection = TicketSelectionSet::from_tickets([regular])
//!     .increment(TicketId::new(1))
//!     .increment(TicketId::new(1));
//!
//! assert_eq!(selection.total_price().to_string(), "200000.00");
//!
//! let request = BookingRequestBuilder::build(EventId::new(7), &selection)?;
//! assert_eq!(request.total_tickets(), 2);
//! # Ok::<(), eventapp_core::BookingError>(())
//! ```

pub mod classifier;
pub mod error;
pub mod lifecycle;
pub mod request;
pub mod resource;
pub mod selection;
pub mod types;

// Re-export main types for convenience
pub use classifier::{BookingErrorClassifier, ExtractedMessage, FailureSignal, GENERIC_ERROR_MESSAGE};
pub use error::{BookingError, BookingResult, ConflictReason, ErrorKind};
pub use lifecycle::{guard_cancel, guard_payment};
pub use request::{BookingRequest, BookingRequestBuilder, TicketOrder};
pub use resource::Resource;
pub use selection::{MAX_TICKETS_PER_BOOKING, TicketSelection, TicketSelectionSet};
pub use types::{
    Booking, BookingDetail, BookingId, BookingItem, BookingStatus, EventId, MAX_FLOAT_MINOR_UNITS, Money,
    MoneyParseError, Ticket, TicketId,
};
