//! Scripted stand-in for the booking API.

use eventapp_client::{ApiOutcome, BookingApi, RawResponse, TransportError};
use eventapp_core::{BookingId, BookingRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Semaphore;

/// One recorded call against [`StubBookingApi`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    /// `POST /bookings`
    Create(BookingRequest),
    /// `GET /bookings/me`
    MyBookings,
    /// `GET /bookings/{id}`
    Detail(BookingId),
    /// `POST /bookings/{id}/pay`
    Pay(BookingId),
    /// `POST /bookings/{id}/cancel`
    Cancel(BookingId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endpoint {
    Create,
    MyBookings,
    Detail,
    Pay,
    Cancel,
}

impl ApiCall {
    const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Create(_) => Endpoint::Create,
            Self::MyBookings => Endpoint::MyBookings,
            Self::Detail(_) => Endpoint::Detail,
            Self::Pay(_) => Endpoint::Pay,
            Self::Cancel(_) => Endpoint::Cancel,
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    create: VecDeque<ApiOutcome>,
    my_bookings: VecDeque<ApiOutcome>,
    detail: VecDeque<ApiOutcome>,
    pay: VecDeque<ApiOutcome>,
    cancel: VecDeque<ApiOutcome>,
    calls: Vec<ApiCall>,
}

impl Script {
    fn queue(&mut self, endpoint: Endpoint) -> &mut VecDeque<ApiOutcome> {
        match endpoint {
            Endpoint::Create => &mut self.create,
            Endpoint::MyBookings => &mut self.my_bookings,
            Endpoint::Detail => &mut self.detail,
            Endpoint::Pay => &mut self.pay,
            Endpoint::Cancel => &mut self.cancel,
        }
    }
}

/// In-memory [`BookingApi`] returning scripted responses.
///
/// Responses are queued per endpoint and consumed in order. An endpoint with
/// nothing queued answers 500 so a missing script shows up as a
/// `ServerError` rather than a hang. Every call is recorded.
///
/// Clones share the same script and call log.
///
/// # Example
///
/// ```
/// use eventapp_testing::{fixtures, ApiCall, StubBookingApi};
/// use eventapp_client::BookingApi;
/// use eventapp_core::BookingId;
///
/// # tokio_test::block_on(async {
/// let api = StubBookingApi::new();
/// api.respond_pay(fixtures::ok(&fixtures::paid_detail(7)));
///
/// let response = api.pay_booking(BookingId::new(7)).await.unwrap();
/// assert_eq!(response.status, 200);
/// assert_eq!(api.calls(), vec![ApiCall::Pay(BookingId::new(7))]);
/// # });
/// ```
#[derive(Clone, Debug, Default)]
pub struct StubBookingApi {
    script: Arc<Mutex<Script>>,
    gate: Option<Arc<Semaphore>>,
}

impl StubBookingApi {
    /// Creates a stub with nothing scripted
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call wait for a permit on `gate` before answering.
    ///
    /// Start with `Semaphore::new(0)` and `add_permits` to release calls
    /// one at a time.
    #[must_use]
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, endpoint: Endpoint, outcome: ApiOutcome) {
        self.lock().queue(endpoint).push_back(outcome);
    }

    /// Queues a response for `create_booking`
    pub fn respond_create(&self, response: RawResponse) {
        self.push(Endpoint::Create, Ok(response));
    }

    /// Queues a response for `my_bookings`
    pub fn respond_my_bookings(&self, response: RawResponse) {
        self.push(Endpoint::MyBookings, Ok(response));
    }

    /// Queues a response for `booking_detail`
    pub fn respond_detail(&self, response: RawResponse) {
        self.push(Endpoint::Detail, Ok(response));
    }

    /// Queues a response for `pay_booking`
    pub fn respond_pay(&self, response: RawResponse) {
        self.push(Endpoint::Pay, Ok(response));
    }

    /// Queues a response for `cancel_booking`
    pub fn respond_cancel(&self, response: RawResponse) {
        self.push(Endpoint::Cancel, Ok(response));
    }

    /// Queues a transport failure for the endpoint `call` targets
    pub fn fail_transport(&self, call: &ApiCall, reason: &str) {
        self.push(call.endpoint(), Err(TransportError::new(reason)));
    }

    /// Every call received so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Number of calls received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    async fn answer(&self, call: ApiCall) -> ApiOutcome {
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let mut script = self.lock();
        let endpoint = call.endpoint();
        script.calls.push(call);
        script.queue(endpoint).pop_front().unwrap_or_else(|| {
            Ok(RawResponse::new(
                500,
                r#"{"success":false,"message":"no scripted response"}"#,
            ))
        })
    }
}

impl BookingApi for StubBookingApi {
    async fn create_booking(&self, request: BookingRequest) -> ApiOutcome {
        self.answer(ApiCall::Create(request)).await
    }

    async fn my_bookings(&self) -> ApiOutcome {
        self.answer(ApiCall::MyBookings).await
    }

    async fn booking_detail(&self, booking_id: BookingId) -> ApiOutcome {
        self.answer(ApiCall::Detail(booking_id)).await
    }

    async fn pay_booking(&self, booking_id: BookingId) -> ApiOutcome {
        self.answer(ApiCall::Pay(booking_id)).await
    }

    async fn cancel_booking(&self, booking_id: BookingId) -> ApiOutcome {
        self.answer(ApiCall::Cancel(booking_id)).await
    }
}
