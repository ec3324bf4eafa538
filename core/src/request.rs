//! Conversion of a ticket selection into a booking creation request.
//!
//! Every UI surface that books tickets goes through
//! [`BookingRequestBuilder`], so the non-empty and cap checks are applied
//! the same way everywhere.

use serde::{Deserialize, Serialize};

use crate::error::{BookingError, BookingResult};
use crate::selection::{self, MAX_TICKETS_PER_BOOKING, TicketSelection, TicketSelectionSet};
use crate::types::{EventId, TicketId};

/// One `(ticket, quantity)` entry of a booking request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketOrder {
    /// Ticket type id
    pub ticket_id: TicketId,
    /// Quantity, always greater than zero
    pub quantity: u32,
}

/// Body of `POST /bookings`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    event_id: EventId,
    tickets: Vec<TicketOrder>,
}

impl BookingRequest {
    /// Event being booked
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Ticket entries in selection order
    #[must_use]
    pub fn tickets(&self) -> &[TicketOrder] {
        &self.tickets
    }

    /// Total tickets requested
    #[must_use]
    pub fn total_tickets(&self) -> u32 {
        self.tickets
            .iter()
            .fold(0_u32, |total, order| total.saturating_add(order.quantity))
    }
}

/// Validates a selection and builds the request for it
#[derive(Clone, Copy, Debug, Default)]
pub struct BookingRequestBuilder;

impl BookingRequestBuilder {
    /// Builds a request from a selection snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if nothing is selected, the booking cap
    /// is exceeded, or a quantity exceeds its ticket's availability.
    pub fn build(event_id: EventId, selection: &TicketSelectionSet) -> BookingResult<BookingRequest> {
        Self::build_from_selections(event_id, selection.selections())
    }

    /// Builds a request from raw selections, e.g. ones restored from a
    /// saved screen state.
    ///
    /// Rules are checked in order and the first violation is reported.
    ///
    /// # Errors
    ///
    /// Same as [`BookingRequestBuilder::build`].
    pub fn build_from_selections(
        event_id: EventId,
        selections: &[TicketSelection],
    ) -> BookingResult<BookingRequest> {
        let total = selection::total_tickets(selections);

        if total == 0 {
            return Err(BookingError::validation("no tickets selected"));
        }

        if total > MAX_TICKETS_PER_BOOKING {
            return Err(BookingError::validation(format!(
                "exceeds per-booking maximum of {MAX_TICKETS_PER_BOOKING} tickets (selected: {total})"
            )));
        }

        if let Some(over) = selections.iter().find(|s| !s.within_availability()) {
            return Err(BookingError::validation(format!(
                "exceeds available quantity for ticket {}",
                over.ticket_id()
            )));
        }

        let tickets = selections
            .iter()
            .filter(|s| s.selected_quantity() > 0)
            .map(|s| TicketOrder {
                ticket_id: s.ticket_id(),
                quantity: s.selected_quantity(),
            })
            .collect();

        Ok(BookingRequest { event_id, tickets })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::{Money, Ticket};

    fn ticket(id: u64, available: u32) -> Ticket {
        Ticket::new(
            TicketId::new(id),
            format!("Ticket {id}"),
            Money::from_minor_units(10_000_000),
            available,
        )
    }

    #[test]
    fn test_empty_selection_rejected() {
        let set = TicketSelectionSet::from_tickets([ticket(1, 5)]);
        let error = BookingRequestBuilder::build(EventId::new(1), &set).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.message(), "no tickets selected");
    }

    #[test]
    fn test_eleven_tickets_rejected() {
        let selections = vec![
            TicketSelection::new(ticket(1, 20), 6),
            TicketSelection::new(ticket(2, 20), 5),
        ];
        let error =
            BookingRequestBuilder::build_from_selections(EventId::new(1), &selections).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(error.message().starts_with("exceeds per-booking maximum"));
    }

    #[test]
    fn test_exactly_ten_tickets_accepted() {
        let selections = vec![
            TicketSelection::new(ticket(1, 20), 6),
            TicketSelection::new(ticket(2, 20), 4),
        ];
        let request =
            BookingRequestBuilder::build_from_selections(EventId::new(1), &selections).unwrap();
        assert_eq!(request.total_tickets(), 10);
    }

    #[test]
    fn test_over_availability_rejected() {
        let selections = vec![TicketSelection::new(ticket(1, 2), 3)];
        let error =
            BookingRequestBuilder::build_from_selections(EventId::new(1), &selections).unwrap_err();
        assert_eq!(error.message(), "exceeds available quantity for ticket 1");
    }

    #[test]
    fn test_zero_entries_dropped_and_order_kept() {
        let set = TicketSelectionSet::from_tickets([ticket(3, 5), ticket(1, 5), ticket(2, 5)])
            .increment(TicketId::new(2))
            .increment(TicketId::new(3))
            .increment(TicketId::new(3));

        let request = BookingRequestBuilder::build(EventId::new(42), &set).unwrap();
        assert_eq!(request.event_id(), EventId::new(42));
        assert_eq!(
            request.tickets(),
            &[
                TicketOrder {
                    ticket_id: TicketId::new(3),
                    quantity: 2
                },
                TicketOrder {
                    ticket_id: TicketId::new(2),
                    quantity: 1
                },
            ]
        );
    }

    #[test]
    fn test_request_wire_format() {
        let set = TicketSelectionSet::from_tickets([ticket(5, 2)]).increment(TicketId::new(5));
        let request = BookingRequestBuilder::build(EventId::new(9), &set).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"eventId": 9, "tickets": [{"ticketId": 5, "quantity": 1}]})
        );
    }
}
