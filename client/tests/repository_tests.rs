//! Repository behavior against a scripted API.

#![allow(clippy::unwrap_used)]

use eventapp_client::{BookingRepository, RawResponse};
use eventapp_core::{
    BookingId, BookingRequestBuilder, BookingStatus, ConflictReason, ErrorKind, EventId, Money,
    TicketId, TicketSelectionSet,
};
use eventapp_testing::{ApiCall, StubBookingApi, fixtures};

fn repository() -> (StubBookingApi, BookingRepository<StubBookingApi>) {
    eventapp_testing::init_test_tracing();
    let api = StubBookingApi::new();
    (api.clone(), BookingRepository::new(api))
}

#[tokio::test]
async fn test_create_two_vip_tickets() {
    let (api, repository) = repository();
    api.respond_create(fixtures::created(&fixtures::pending_booking(42)));

    let vip = TicketId::new(1);
    let selection = TicketSelectionSet::from_tickets(fixtures::catalogue())
        .increment(vip)
        .increment(vip);
    let request = BookingRequestBuilder::build(EventId::new(7), &selection).unwrap();

    let booking = repository.create(request.clone()).await.unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.total_price, Money::from_minor_units(200_000));
    assert_eq!(api.calls(), vec![ApiCall::Create(request)]);
}

#[tokio::test]
async fn test_single_ticket_type_booking_end_to_end() {
    let (api, repository) = repository();
    api.respond_create(RawResponse::new(
        201,
        r#"{"success": true, "message": "Booking created", "data": {
            "bookingId": 11, "eventTitle": "Jazz Night",
            "items": [{"ticketId": 1, "ticketName": "Regular", "quantity": 2, "price": 100000, "subtotal": 200000}],
            "totalPrice": 200000, "status": "PENDING", "createdAt": "2025-01-01T10:00:00"
        }}"#,
    ));

    let regular = TicketId::new(1);
    let tickets = vec![fixtures::ticket(1, "Regular", 10_000_000, 2)];
    let twice = TicketSelectionSet::from_tickets(tickets)
        .increment(regular)
        .increment(regular);
    let thrice = twice.increment(regular);
    assert_eq!(thrice, twice);

    let request = BookingRequestBuilder::build(EventId::new(5), &twice).unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({"eventId": 5, "tickets": [{"ticketId": 1, "quantity": 2}]})
    );

    let booking = repository.create(request).await.unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.total_price, Money::checked_from_major_units(200_000).unwrap());
    assert_eq!(booking.total_price.to_string(), "200000.00");
}

#[tokio::test]
async fn test_pay_quota_exceeded_from_repository() {
    let (api, repository) = repository();
    api.respond_pay(RawResponse::new(400, r#"{"message":"quota exceeded"}"#));

    let error = repository.pay(BookingId::new(11)).await.unwrap_err();

    assert_eq!(
        error.kind(),
        ErrorKind::Conflict {
            reason: ConflictReason::QuotaExceeded
        }
    );
    assert!(error.message().contains("quota"));
}

#[tokio::test]
async fn test_list_mine_with_null_data_is_empty() {
    let (api, repository) = repository();
    api.respond_my_bookings(RawResponse::new(
        200,
        r#"{"success": true, "message": "OK", "errorCode": null, "data": null}"#,
    ));

    assert!(repository.list_mine().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_mine_with_empty_data_is_empty() {
    let (api, repository) = repository();
    api.respond_my_bookings(RawResponse::new(200, r#"{"success": true, "data": []}"#));

    assert!(repository.list_mine().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_mine_with_no_content_is_empty() {
    let (api, repository) = repository();
    api.respond_my_bookings(RawResponse::new(204, ""));

    assert!(repository.list_mine().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_mine_decodes_bookings() {
    let (api, repository) = repository();
    let bookings = vec![
        fixtures::pending_booking(1),
        fixtures::vip_booking(2, BookingStatus::Cancelled),
    ];
    api.respond_my_bookings(fixtures::ok(&bookings));

    assert_eq!(repository.list_mine().await.unwrap(), bookings);
}

#[tokio::test]
async fn test_success_false_envelope_is_error() {
    let (api, repository) = repository();
    api.respond_create(fixtures::rejected("Quota exceeded for this event"));

    let request = BookingRequestBuilder::build(
        EventId::new(7),
        &TicketSelectionSet::from_tickets(fixtures::catalogue()).increment(TicketId::new(2)),
    )
    .unwrap();
    let error = repository.create(request).await.unwrap_err();

    assert_eq!(
        error.kind(),
        ErrorKind::Conflict {
            reason: ConflictReason::QuotaExceeded
        }
    );
}

#[tokio::test]
async fn test_detail_with_cancelled_alias() {
    let (api, repository) = repository();
    api.respond_detail(RawResponse::new(
        200,
        r#"{"success": true, "data": {
            "bookingId": 5, "eventTitle": "Jazz Night", "items": [],
            "totalPrice": 0, "status": "CANCELED", "createdAt": "2025-01-01T00:00:00"
        }}"#,
    ));

    let detail = repository.detail(BookingId::new(5)).await.unwrap();
    assert_eq!(detail.status(), BookingStatus::Cancelled);
    assert!(detail.is_consistent());
}

#[tokio::test]
async fn test_error_statuses_are_classified() {
    let cases = [
        (401, ErrorKind::Unauthorized),
        (403, ErrorKind::Forbidden),
        (404, ErrorKind::NotFound),
        (500, ErrorKind::ServerError),
        (503, ErrorKind::ServerError),
        (418, ErrorKind::Unknown),
    ];

    for (status, kind) in cases {
        let (api, repository) = repository();
        api.respond_detail(fixtures::status(status, "nope"));
        let error = repository.detail(BookingId::new(1)).await.unwrap_err();
        assert_eq!(error.kind(), kind, "status {status}");
    }
}

#[tokio::test]
async fn test_empty_error_body_uses_default_message() {
    let (api, repository) = repository();
    api.respond_detail(RawResponse::new(404, ""));

    let error = repository.detail(BookingId::new(1)).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert_eq!(error.message(), ErrorKind::NotFound.default_message());
}

#[tokio::test]
async fn test_transport_failure_is_network_unavailable() {
    let (api, repository) = repository();
    api.fail_transport(&ApiCall::MyBookings, "connection refused");

    let error = repository.list_mine().await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NetworkUnavailable);
    assert!(error.kind().is_retryable());
}
