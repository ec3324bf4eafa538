//! Per-screen booking state.
//!
//! [`BookingSession`] publishes [`Resource`] snapshots over `tokio::sync::watch`
//! channels so a UI layer can render loading, success and error states. The
//! mutating actions share a single in-flight flag: while one create, pay or
//! cancel is outstanding, another is rejected with `ActionInProgress`.

use crate::{
    api::BookingApi, lifecycle::BookingLifecycle, repository::BookingRepository,
    token::InMemorySession,
};
use eventapp_core::{
    Booking, BookingDetail, BookingError, BookingId, BookingRequestBuilder, BookingResult,
    EventId, Resource, TicketSelectionSet,
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::watch;

/// Observable state slot; `None` until the first request
pub type Slot<T> = Option<Resource<T>>;

/// Releases the in-flight flag when dropped
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// View state for the booking screens
pub struct BookingSession<A> {
    lifecycle: BookingLifecycle<A>,
    auth: Option<Arc<InMemorySession>>,
    in_flight: AtomicBool,
    my_bookings: watch::Sender<Slot<Vec<Booking>>>,
    detail: watch::Sender<Slot<BookingDetail>>,
    create_state: watch::Sender<Slot<Booking>>,
    pay_state: watch::Sender<Slot<BookingDetail>>,
    cancel_state: watch::Sender<Slot<Booking>>,
}

impl<A: BookingApi> BookingSession<A> {
    /// Creates a session over `repository`
    #[must_use]
    pub fn new(repository: BookingRepository<A>) -> Self {
        Self {
            lifecycle: BookingLifecycle::new(repository),
            auth: None,
            in_flight: AtomicBool::new(false),
            my_bookings: watch::channel(None).0,
            detail: watch::channel(None).0,
            create_state: watch::channel(None).0,
            pay_state: watch::channel(None).0,
            cancel_state: watch::channel(None).0,
        }
    }

    /// Clears `auth` whenever the server answers `Unauthorized`
    #[must_use]
    pub fn with_auth_session(mut self, auth: Arc<InMemorySession>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// The lifecycle dispatcher
    #[must_use]
    pub const fn lifecycle(&self) -> &BookingLifecycle<A> {
        &self.lifecycle
    }

    /// Returns true while a create, pay or cancel is outstanding
    #[must_use]
    pub fn is_action_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Subscribes to the "my bookings" list
    #[must_use]
    pub fn my_bookings(&self) -> watch::Receiver<Slot<Vec<Booking>>> {
        self.my_bookings.subscribe()
    }

    /// Subscribes to the booking detail
    #[must_use]
    pub fn detail(&self) -> watch::Receiver<Slot<BookingDetail>> {
        self.detail.subscribe()
    }

    /// Subscribes to the create action
    #[must_use]
    pub fn create_state(&self) -> watch::Receiver<Slot<Booking>> {
        self.create_state.subscribe()
    }

    /// Subscribes to the pay action
    #[must_use]
    pub fn pay_state(&self) -> watch::Receiver<Slot<BookingDetail>> {
        self.pay_state.subscribe()
    }

    /// Subscribes to the cancel action
    #[must_use]
    pub fn cancel_state(&self) -> watch::Receiver<Slot<Booking>> {
        self.cancel_state.subscribe()
    }

    /// Loads the caller's bookings
    ///
    /// # Errors
    ///
    /// Returns the classified repository failure, which is also published.
    pub async fn load_my_bookings(&self) -> BookingResult<Vec<Booking>> {
        self.my_bookings.send_replace(Some(Resource::Loading));
        let result = self.lifecycle.repository().list_mine().await;
        self.publish(&self.my_bookings, result)
    }

    /// Loads one booking's detail
    ///
    /// # Errors
    ///
    /// Returns the classified repository failure, which is also published.
    pub async fn load_detail(&self, booking_id: BookingId) -> BookingResult<BookingDetail> {
        self.detail.send_replace(Some(Resource::Loading));
        let result = self.lifecycle.repository().detail(booking_id).await;
        self.publish(&self.detail, result)
    }

    /// Validates `selection` and creates a booking for `event_id`
    ///
    /// # Errors
    ///
    /// Returns `ActionInProgress` if another action is outstanding,
    /// `Validation` if the selection is not bookable, otherwise the
    /// classified repository failure.
    pub async fn create(&self, event_id: EventId, selection: &TicketSelectionSet) -> BookingResult<Booking> {
        let _in_flight = self.begin_action()?;

        let request = match BookingRequestBuilder::build(event_id, selection) {
            Ok(request) => request,
            Err(error) => return self.publish(&self.create_state, Err(error)),
        };

        self.create_state.send_replace(Some(Resource::Loading));
        let result = self.lifecycle.repository().create(request).await;
        if let Ok(booking) = &result {
            tracing::info!(booking_id = %booking.booking_id, event_id = %event_id, "Booking created");
        }
        self.publish(&self.create_state, result)
    }

    /// Pays `booking`; a successful payment also refreshes the detail slot
    ///
    /// # Errors
    ///
    /// Returns `ActionInProgress` if another action is outstanding,
    /// otherwise whatever [`BookingLifecycle::request_payment`] returns.
    pub async fn pay(&self, booking: &Booking) -> BookingResult<BookingDetail> {
        let _in_flight = self.begin_action()?;

        self.pay_state.send_replace(Some(Resource::Loading));
        let result = self.lifecycle.request_payment(booking).await;
        if let Ok(detail) = &result {
            self.detail.send_replace(Some(Resource::Success(detail.clone())));
        }
        self.publish(&self.pay_state, result)
    }

    /// Cancels `booking`
    ///
    /// # Errors
    ///
    /// Returns `ActionInProgress` if another action is outstanding,
    /// otherwise whatever [`BookingLifecycle::request_cancel`] returns.
    pub async fn cancel(&self, booking: &Booking) -> BookingResult<Booking> {
        let _in_flight = self.begin_action()?;

        self.cancel_state.send_replace(Some(Resource::Loading));
        let result = self.lifecycle.request_cancel(booking).await;
        self.publish(&self.cancel_state, result)
    }

    /// Clears the create slot
    pub fn reset_create(&self) {
        self.create_state.send_replace(None);
    }

    /// Clears the pay slot
    pub fn reset_pay(&self) {
        self.pay_state.send_replace(None);
    }

    /// Clears the cancel slot
    pub fn reset_cancel(&self) {
        self.cancel_state.send_replace(None);
    }

    fn begin_action(&self) -> BookingResult<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| {
                tracing::debug!("Rejected booking action while another is in flight");
                BookingError::action_in_progress()
            })
    }

    fn publish<T: Clone>(&self, slot: &watch::Sender<Slot<T>>, result: BookingResult<T>) -> BookingResult<T> {
        let unauthorized = result
            .as_ref()
            .is_err_and(|error| error.kind().requires_reauthentication());
        if let Some(auth) = self.auth.as_ref().filter(|_| unauthorized) {
            auth.clear();
        }
        slot.send_replace(Some(Resource::from(result.clone())));
        result
    }
}

impl<A> std::fmt::Debug for BookingSession<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingSession")
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
