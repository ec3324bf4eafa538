//! In-progress ticket selection for one event.
//!
//! A [`TicketSelectionSet`] is an immutable snapshot. `increment` and
//! `decrement` return a new snapshot and the caller re-renders from it.
//! Requests that would break an invariant return an unchanged snapshot
//! rather than an error.
//!
//! Invariants, after every operation:
//! - each selection holds `0 ≤ selected ≤ available`
//! - the total across selections is at most [`MAX_TICKETS_PER_BOOKING`]

use serde::{Deserialize, Serialize};

use crate::types::{Money, Ticket, TicketId};

/// Global cap on tickets in a single booking, across all ticket types
pub const MAX_TICKETS_PER_BOOKING: u32 = 10;

/// A ticket type paired with the quantity the user is considering
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSelection {
    ticket: Ticket,
    selected_quantity: u32,
}

impl TicketSelection {
    /// Creates a selection with an explicit quantity.
    ///
    /// No invariant is checked here; a set built from these values is
    /// validated again by the request builder before submission.
    #[must_use]
    pub const fn new(ticket: Ticket, selected_quantity: u32) -> Self {
        Self {
            ticket,
            selected_quantity,
        }
    }

    /// The selected ticket type
    #[must_use]
    pub const fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    /// Ticket type id
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket.ticket_id
    }

    /// Selected quantity
    #[must_use]
    pub const fn selected_quantity(&self) -> u32 {
        self.selected_quantity
    }

    /// `price × selected_quantity`, `None` on overflow
    #[must_use]
    pub const fn subtotal(&self) -> Option<Money> {
        self.ticket.price.checked_multiply(self.selected_quantity)
    }

    /// Returns true if the quantity is within the ticket's inventory
    #[must_use]
    pub const fn within_availability(&self) -> bool {
        self.selected_quantity <= self.ticket.available_quantity
    }
}

/// Per-ticket-type quantities for one event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSelectionSet {
    selections: Vec<TicketSelection>,
}

impl TicketSelectionSet {
    /// Starts a selection with every offered ticket type at zero
    #[must_use]
    pub fn from_tickets(tickets: impl IntoIterator<Item = Ticket>) -> Self {
        Self {
            selections: tickets
                .into_iter()
                .map(|ticket| TicketSelection::new(ticket, 0))
                .collect(),
        }
    }

    /// Selections in the order the event offers them
    #[must_use]
    pub fn selections(&self) -> &[TicketSelection] {
        &self.selections
    }

    /// Sum of selected quantities
    #[must_use]
    pub fn total_tickets(&self) -> u32 {
        total_tickets(&self.selections)
    }

    /// Sum of `price × quantity` across selections.
    ///
    /// Quantities are capped at ten and prices are minor units, so this
    /// cannot overflow for any amount the API can express; an overflowing
    /// sum saturates.
    #[must_use]
    pub fn total_price(&self) -> Money {
        Money::checked_sum(
            self.selections
                .iter()
                .map(|s| s.subtotal().unwrap_or(Money::from_minor_units(u64::MAX))),
        )
        .unwrap_or(Money::from_minor_units(u64::MAX))
    }

    /// Returns true if nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_tickets() == 0
    }

    /// Selected quantity for a ticket type, zero if unknown
    #[must_use]
    pub fn quantity_of(&self, ticket_id: TicketId) -> u32 {
        self.find(ticket_id)
            .map_or(0, TicketSelection::selected_quantity)
    }

    /// Whether `increment(ticket_id)` would change anything
    #[must_use]
    pub fn can_increment(&self, ticket_id: TicketId) -> bool {
        self.total_tickets() < MAX_TICKETS_PER_BOOKING
            && self
                .find(ticket_id)
                .is_some_and(|s| s.selected_quantity < s.ticket.available_quantity)
    }

    /// Whether `decrement(ticket_id)` would change anything
    #[must_use]
    pub fn can_decrement(&self, ticket_id: TicketId) -> bool {
        self.find(ticket_id).is_some_and(|s| s.selected_quantity > 0)
    }

    /// Adds one ticket of the given type.
    ///
    /// Unchanged if the booking cap is reached, the ticket type has no
    /// remaining availability, or the id is not offered.
    #[must_use]
    pub fn increment(&self, ticket_id: TicketId) -> Self {
        if !self.can_increment(ticket_id) {
            tracing::trace!(%ticket_id, total = self.total_tickets(), "Increment ignored");
            return self.clone();
        }
        self.with_adjusted(ticket_id, |quantity| quantity + 1)
    }

    /// Removes one ticket of the given type. Unchanged at zero.
    #[must_use]
    pub fn decrement(&self, ticket_id: TicketId) -> Self {
        if !self.can_decrement(ticket_id) {
            return self.clone();
        }
        self.with_adjusted(ticket_id, |quantity| quantity - 1)
    }

    /// Resets every quantity to zero
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::from_tickets(self.selections.iter().map(|s| s.ticket.clone()))
    }

    fn find(&self, ticket_id: TicketId) -> Option<&TicketSelection> {
        self.selections.iter().find(|s| s.ticket_id() == ticket_id)
    }

    fn with_adjusted(&self, ticket_id: TicketId, adjust: impl Fn(u32) -> u32) -> Self {
        Self {
            selections: self
                .selections
                .iter()
                .map(|s| {
                    if s.ticket_id() == ticket_id {
                        TicketSelection::new(s.ticket.clone(), adjust(s.selected_quantity))
                    } else {
                        s.clone()
                    }
                })
                .collect(),
        }
    }
}

/// Sum of quantities over any selection slice, saturating
pub(crate) fn total_tickets(selections: &[TicketSelection]) -> u32 {
    selections
        .iter()
        .fold(0_u32, |total, s| total.saturating_add(s.selected_quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ticket(id: u64, price_minor: u64, available: u32) -> Ticket {
        Ticket::new(
            TicketId::new(id),
            format!("Ticket {id}"),
            Money::from_minor_units(price_minor),
            available,
        )
    }

    #[test]
    fn test_increment_and_decrement() {
        let set = TicketSelectionSet::from_tickets([ticket(1, 10_000, 5)]);
        let id = TicketId::new(1);

        let set = set.increment(id).increment(id);
        assert_eq!(set.quantity_of(id), 2);

        let set = set.decrement(id);
        assert_eq!(set.quantity_of(id), 1);
        assert_eq!(set.total_tickets(), 1);
    }

    #[test]
    fn test_original_snapshot_is_untouched() {
        let before = TicketSelectionSet::from_tickets([ticket(1, 10_000, 5)]);
        let after = before.increment(TicketId::new(1));
        assert_eq!(before.total_tickets(), 0);
        assert_eq!(after.total_tickets(), 1);
    }

    #[test]
    fn test_increment_stops_at_availability() {
        let id = TicketId::new(1);
        let mut set = TicketSelectionSet::from_tickets([ticket(1, 10_000, 2)]);
        for _ in 0..5 {
            set = set.increment(id);
        }
        assert_eq!(set.quantity_of(id), 2);
        assert!(!set.can_increment(id));
    }

    #[test]
    fn test_increment_is_noop_at_global_cap() {
        let vip = TicketId::new(1);
        let regular = TicketId::new(2);
        let mut set =
            TicketSelectionSet::from_tickets([ticket(1, 50_000, 8), ticket(2, 10_000, 20)]);
        for _ in 0..8 {
            set = set.increment(vip);
        }
        set = set.increment(regular).increment(regular);
        assert_eq!(set.total_tickets(), MAX_TICKETS_PER_BOOKING);

        let unchanged = set.increment(regular);
        assert_eq!(unchanged, set);
        assert!(!set.can_increment(regular));
    }

    #[test]
    fn test_decrement_at_zero_is_noop() {
        let id = TicketId::new(1);
        let set = TicketSelectionSet::from_tickets([ticket(1, 10_000, 2)]);
        assert_eq!(set.decrement(id), set);
        assert!(!set.can_decrement(id));
    }

    #[test]
    fn test_unknown_ticket_is_ignored() {
        let set = TicketSelectionSet::from_tickets([ticket(1, 10_000, 2)]);
        let unknown = TicketId::new(99);
        assert_eq!(set.increment(unknown), set);
        assert_eq!(set.decrement(unknown), set);
        assert_eq!(set.quantity_of(unknown), 0);
    }

    #[test]
    fn test_total_price_is_exact() {
        let id = TicketId::new(1);
        let set = TicketSelectionSet::from_tickets([ticket(1, 4_999_999, 5)])
            .increment(id)
            .increment(id)
            .increment(id)
            .decrement(id)
            .increment(id);
        assert_eq!(set.total_price(), Money::parse("149999.97").unwrap());
        assert_eq!(set.total_price().to_string(), "149999.97");
    }

    #[test]
    fn test_clear_resets_quantities() {
        let id = TicketId::new(1);
        let set = TicketSelectionSet::from_tickets([ticket(1, 10_000, 3)])
            .increment(id)
            .clear();
        assert!(set.is_empty());
        assert_eq!(set.selections().len(), 1);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Increment(usize),
        Decrement(usize),
    }

    fn op_strategy(ticket_types: usize) -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..ticket_types).prop_map(Op::Increment),
            (0..ticket_types).prop_map(Op::Decrement),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_after_every_operation(
            availability in prop::collection::vec(0_u32..15, 1..5),
            prices in prop::collection::vec(0_u64..10_000_000, 5),
            ops in prop::collection::vec(op_strategy(5), 0..60),
        ) {
            let tickets: Vec<Ticket> = availability
                .iter()
                .enumerate()
                .map(|(i, &available)| ticket(i as u64, prices[i], available))
                .collect();
            let ids: Vec<TicketId> = tickets.iter().map(|t| t.ticket_id).collect();
            let mut set = TicketSelectionSet::from_tickets(tickets);

            for op in ops {
                set = match op {
                    Op::Increment(i) => set.increment(ids[i % ids.len()]),
                    Op::Decrement(i) => set.decrement(ids[i % ids.len()]),
                };

                prop_assert!(set.total_tickets() <= MAX_TICKETS_PER_BOOKING);
                for selection in set.selections() {
                    prop_assert!(selection.within_availability());
                }

                let expected: u64 = set
                    .selections()
                    .iter()
                    .map(|s| s.ticket().price.minor_units() * u64::from(s.selected_quantity()))
                    .sum();
                prop_assert_eq!(set.total_price().minor_units(), expected);
            }
        }
    }
}
