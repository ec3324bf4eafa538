//! Guarded dispatch of pay and cancel.
//!
//! Each action checks the caller's snapshot with the pure guards from
//! [`eventapp_core::lifecycle`] and only then talks to the server. A guard
//! failure means no request is sent.

use crate::{api::BookingApi, repository::BookingRepository};
use eventapp_core::{Booking, BookingDetail, BookingResult, BookingStatus, guard_cancel, guard_payment};

/// Dispatches lifecycle transitions through a repository
#[derive(Clone, Debug)]
pub struct BookingLifecycle<A> {
    repository: BookingRepository<A>,
}

impl<A: BookingApi> BookingLifecycle<A> {
    /// Creates a dispatcher over `repository`
    #[must_use]
    pub const fn new(repository: BookingRepository<A>) -> Self {
        Self { repository }
    }

    /// The wrapped repository
    #[must_use]
    pub const fn repository(&self) -> &BookingRepository<A> {
        &self.repository
    }

    /// Pays a pending booking.
    ///
    /// If the pay response is not a consistent `PAID` detail, the detail is
    /// read once more and that snapshot is returned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBookingState` without a network call if the guard
    /// rejects `booking`, otherwise the classified API failure.
    pub async fn request_payment(&self, booking: &Booking) -> BookingResult<BookingDetail> {
        guard_payment(booking)?;

        let booking_id = booking.booking_id;
        let detail = self.repository.pay(booking_id).await?;

        if detail.status() == BookingStatus::Paid && detail.is_consistent() {
            tracing::info!(booking_id = %booking_id, "Booking paid");
            return Ok(detail);
        }

        tracing::warn!(
            booking_id = %booking_id,
            status = %detail.status(),
            "Pay response is not a consistent paid snapshot, re-reading detail"
        );
        let detail = self.repository.detail(booking_id).await?;
        tracing::info!(booking_id = %booking_id, status = %detail.status(), "Booking detail refreshed after payment");
        Ok(detail)
    }

    /// Cancels a pending booking.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBookingState` without a network call if the booking
    /// is not pending, otherwise the classified API failure.
    pub async fn request_cancel(&self, booking: &Booking) -> BookingResult<Booking> {
        guard_cancel(booking)?;

        let cancelled = self.repository.cancel(booking.booking_id).await?;
        tracing::info!(booking_id = %cancelled.booking_id, status = %cancelled.status, "Booking cancelled");
        Ok(cancelled)
    }
}
