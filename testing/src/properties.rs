//! proptest strategies for ticket catalogues and selection operations.

use eventapp_core::{Money, Ticket, TicketId, TicketSelectionSet};
use proptest::prelude::*;

/// One user interaction with a ticket counter, by index into the catalogue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionOp {
    /// Press `+`
    Increment(usize),
    /// Press `-`
    Decrement(usize),
}

/// A catalogue of 1 to 5 tickets with distinct ids, prices up to 100000.00
/// and availability up to 15
pub fn catalogue() -> impl Strategy<Value = Vec<Ticket>> {
    prop::collection::vec((0_u64..10_000_000, 0_u32..15), 1..=5).prop_map(|entries| {
        entries
            .into_iter()
            .zip(1_u64..)
            .map(|((price, available), id)| {
                Ticket::new(
                    TicketId::new(id),
                    format!("Ticket {id}"),
                    Money::from_minor_units(price),
                    available,
                )
            })
            .collect()
    })
}

/// Up to `max_len` operations over a catalogue of at most five tickets
pub fn operations(max_len: usize) -> impl Strategy<Value = Vec<SelectionOp>> {
    prop::collection::vec(
        prop_oneof![
            (0_usize..5).prop_map(SelectionOp::Increment),
            (0_usize..5).prop_map(SelectionOp::Decrement),
        ],
        0..max_len,
    )
}

/// Applies `ops` to a fresh selection over `tickets`
#[must_use]
pub fn apply(tickets: &[Ticket], ops: &[SelectionOp]) -> TicketSelectionSet {
    let ids: Vec<TicketId> = tickets.iter().map(|t| t.ticket_id).collect();
    let start = TicketSelectionSet::from_tickets(tickets.iter().cloned());
    if ids.is_empty() {
        return start;
    }

    ops.iter().fold(start, |set, op| match *op {
        SelectionOp::Increment(i) => set.increment(ids[i % ids.len()]),
        SelectionOp::Decrement(i) => set.decrement(ids[i % ids.len()]),
    })
}

/// A selection reached by a random sequence of operations
pub fn selection() -> impl Strategy<Value = TicketSelectionSet> {
    (catalogue(), operations(40)).prop_map(|(tickets, ops)| apply(&tickets, &ops))
}
