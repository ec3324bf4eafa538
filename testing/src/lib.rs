//! # Event Booking Testing
//!
//! Testing utilities for the event booking client.
//!
//! This crate provides:
//! - [`StubBookingApi`]: a scripted, recording [`eventapp_client::BookingApi`]
//! - Fixtures for tickets, bookings and response envelopes
//! - proptest strategies for ticket catalogues and selection operations
//!
//! ## Example
//!
//! ```
//! use eventapp_client::BookingRepository;
//! use eventapp_testing::{fixtures, StubBookingApi};
//!
//! # tokio_test::block_on(async {
//! let api = StubBookingApi::new();
//! api.respond_my_bookings(fixtures::ok(&vec![fixtures::pending_booking(1)]));
//!
//! let repository = BookingRepository::new(api.clone());
//! let bookings = repository.list_mine().await.unwrap();
//!
//! assert_eq!(bookings.len(), 1);
//! assert_eq!(api.call_count(), 1);
//! # });
//! ```

pub mod fixtures;
pub mod mocks;
pub mod properties;

// Re-export commonly used items
pub use mocks::{ApiCall, StubBookingApi};

/// Installs a test-writer `tracing` subscriber, once per process.
///
/// Honors `RUST_LOG`; repeated calls are ignored.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventapp_client=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
