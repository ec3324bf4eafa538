//! # Event Booking API Client
//!
//! Async client for the event booking backend: typed repository access to
//! the `/bookings` endpoints, guarded pay/cancel dispatch, and observable
//! per-screen session state.
//!
//! ## Example
//!
//! ```no_run
//! use eventapp_client::{BookingRepository, ClientConfig, HttpBookingApi, StaticToken};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env();
//!     let api = HttpBookingApi::new(&config, Arc::new(StaticToken::new("jwt")))?;
//!     let repository = BookingRepository::new(api);
//!
//!     for booking in repository.list_mine().await? {
//!         println!("{} {} {}", booking.booking_id, booking.status, booking.total_price);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! - [`BookingApi`]: raw transport, implemented by [`HttpBookingApi`]
//! - [`BookingRepository`]: envelope decoding and error classification
//! - [`BookingLifecycle`]: client-side guards before pay and cancel
//! - [`BookingSession`]: `watch` channels of [`eventapp_core::Resource`] snapshots

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod repository;
pub mod session;
pub mod token;

// Re-export main types for convenience
pub use api::{ApiOutcome, BookingApi, RawResponse, TransportError};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use envelope::Envelope;
pub use error::ClientError;
pub use http::HttpBookingApi;
pub use lifecycle::BookingLifecycle;
pub use repository::BookingRepository;
pub use session::{BookingSession, Slot};
pub use token::{InMemorySession, StaticToken, TokenProvider};
