//! Tickets, bookings and wire responses for tests.
//!
//! Bookings built here are always arithmetically consistent: item subtotals
//! are `quantity × price` and the total is their sum.

use chrono::{DateTime, TimeZone, Utc};
use eventapp_client::{Envelope, RawResponse};
use eventapp_core::{
    Booking, BookingDetail, BookingId, BookingItem, BookingStatus, Money, Ticket, TicketId,
};
use serde::Serialize;

/// VIP unit price used by the default fixtures, in minor units (1000.00)
pub const VIP_PRICE: u64 = 100_000;

/// Fixed creation time for deterministic snapshots (2025-01-01 00:00:00 UTC)
#[must_use]
pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Fixed payment time, one hour after [`created_at`]
#[must_use]
pub fn paid_at() -> DateTime<Utc> {
    created_at() + chrono::Duration::hours(1)
}

/// A ticket type priced in minor units
#[must_use]
pub fn ticket(id: u64, name: &str, price_minor: u64, available: u32) -> Ticket {
    Ticket::new(TicketId::new(id), name, Money::from_minor_units(price_minor), available)
}

/// A VIP (1000.00) and a Regular (250.00) ticket, five of each available
#[must_use]
pub fn catalogue() -> Vec<Ticket> {
    vec![ticket(1, "VIP", VIP_PRICE, 5), ticket(2, "Regular", 25_000, 5)]
}

/// A consistent item for `quantity` tickets of `ticket`
#[must_use]
pub fn item(ticket: &Ticket, quantity: u32) -> BookingItem {
    BookingItem {
        ticket_id: ticket.ticket_id,
        ticket_name: ticket.ticket_name.clone(),
        quantity,
        price: ticket.price,
        subtotal: ticket
            .price
            .checked_multiply(quantity)
            .unwrap_or(Money::ZERO),
    }
}

/// A consistent booking over `items`
#[must_use]
pub fn booking(id: u64, status: BookingStatus, items: Vec<BookingItem>) -> Booking {
    let total_price =
        Money::checked_sum(items.iter().map(|item| item.subtotal)).unwrap_or(Money::ZERO);
    Booking {
        booking_id: BookingId::new(id),
        event_title: "Jazz Night".to_string(),
        items,
        total_price,
        status,
        created_at: created_at(),
    }
}

/// Two VIP tickets, total 2000.00, in `status`
#[must_use]
pub fn vip_booking(id: u64, status: BookingStatus) -> Booking {
    booking(id, status, vec![item(&ticket(1, "VIP", VIP_PRICE, 5), 2)])
}

/// Two VIP tickets, pending payment
#[must_use]
pub fn pending_booking(id: u64) -> Booking {
    vip_booking(id, BookingStatus::Pending)
}

/// Detail of [`pending_booking`]
#[must_use]
pub fn pending_detail(id: u64) -> BookingDetail {
    BookingDetail {
        booking: pending_booking(id),
        paid_at: None,
        qr_code: None,
    }
}

/// Detail of a paid [`vip_booking`] with payment time and QR payload
#[must_use]
pub fn paid_detail(id: u64) -> BookingDetail {
    BookingDetail {
        booking: vip_booking(id, BookingStatus::Paid),
        paid_at: Some(paid_at()),
        qr_code: Some("iVBORw0KGgoAAAANSUhEUgAAAAEAAAAB".to_string()),
    }
}

/// `200` with a successful envelope around `data`
#[must_use]
pub fn ok<T: Serialize>(data: &T) -> RawResponse {
    RawResponse::new(200, envelope_json(data))
}

/// `201` with a successful envelope around `data`
#[must_use]
pub fn created<T: Serialize>(data: &T) -> RawResponse {
    RawResponse::new(201, envelope_json(data))
}

/// `200` with `success: false` and `message`
#[must_use]
pub fn rejected(message: &str) -> RawResponse {
    RawResponse::new(200, to_json(&Envelope::<()>::rejected(message)))
}

/// Any status with a `{"message": ...}` error body
#[must_use]
pub fn status(status: u16, message: &str) -> RawResponse {
    RawResponse::new(status, serde_json::json!({ "message": message }).to_string())
}

/// Successful envelope JSON around `data`
#[must_use]
pub fn envelope_json<T: Serialize>(data: &T) -> String {
    to_json(&Envelope::ok(data))
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
