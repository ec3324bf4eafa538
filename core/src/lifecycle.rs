//! Booking status transitions and client-side preconditions.
//!
//! The server is the authority on booking state. These guards run before a
//! mutating call is dispatched, so requests that would predictably fail
//! never leave the device. They check the status of the snapshot the caller
//! holds, not what the UI happens to display.
//!
//! ```text
//! PENDING ──pay──▶ PAID        (terminal)
//!    │
//!    └──cancel──▶ CANCELLED    (terminal)
//! ```

use crate::error::{BookingError, BookingResult};
use crate::selection::MAX_TICKETS_PER_BOOKING;
use crate::types::{Booking, BookingStatus};

impl BookingStatus {
    /// Validates a transition from this status.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBookingState` for anything other than
    /// `PENDING → PAID` and `PENDING → CANCELLED`.
    pub fn validate_transition(&self, to: Self) -> BookingResult<()> {
        if self.is_terminal() {
            return Err(BookingError::invalid_state(format!(
                "booking is {self} and cannot move to {to}"
            )));
        }

        match (self, to) {
            (Self::Pending, Self::Paid | Self::Cancelled) => Ok(()),
            _ => Err(BookingError::invalid_state(format!(
                "transition from {self} to {to} is not permitted"
            ))),
        }
    }
}

/// Checks that a payment may be requested for this booking.
///
/// # Errors
///
/// Returns `InvalidBookingState` if the booking is not pending, holds no
/// tickets or more than the per-booking maximum, or its totals do not add
/// up.
pub fn guard_payment(booking: &Booking) -> BookingResult<()> {
    booking.status.validate_transition(BookingStatus::Paid)?;

    let tickets = booking.total_tickets();
    if tickets == 0 || tickets > MAX_TICKETS_PER_BOOKING {
        return Err(BookingError::invalid_state(format!(
            "booking {} holds {tickets} tickets; payable bookings hold 1 to {MAX_TICKETS_PER_BOOKING}",
            booking.booking_id
        )));
    }

    if !booking.totals_consistent() {
        return Err(BookingError::invalid_state(format!(
            "booking {} totals do not match its items",
            booking.booking_id
        )));
    }

    Ok(())
}

/// Checks that this booking may be cancelled.
///
/// # Errors
///
/// Returns `InvalidBookingState` unless the booking is pending.
pub fn guard_cancel(booking: &Booking) -> BookingResult<()> {
    booking.status.validate_transition(BookingStatus::Cancelled)
}
