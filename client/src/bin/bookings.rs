//! Command-line access to the booking API.
//!
//! # Usage
//!
//! ```bash
//! export EVENTAPP_API_URL=http://localhost:8899/api/v1
//! export EVENTAPP_TOKEN=<jwt>
//!
//! cargo run --bin bookings -- list
//! cargo run --bin bookings -- show 42
//! cargo run --bin bookings -- pay 42
//! cargo run --bin bookings -- cancel 42
//! ```
//!
//! `pay` and `cancel` fetch the booking detail first, so the lifecycle
//! guards run against the server's current status.

use clap::{Parser, Subcommand};
use eventapp_client::{
    BookingLifecycle, BookingRepository, ClientConfig, HttpBookingApi, InMemorySession,
};
use eventapp_core::{Booking, BookingDetail, BookingError, BookingId};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Inspect, pay and cancel your event bookings.
#[derive(Parser, Debug)]
#[command(name = "bookings", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List your bookings.
    List,
    /// Show one booking with its payment details.
    Show {
        /// Booking id
        id: u64,
    },
    /// Pay a pending booking.
    Pay {
        /// Booking id
        id: u64,
    },
    /// Cancel a pending booking.
    Cancel {
        /// Booking id
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,eventapp_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, authenticated = config.token.is_some(), "Configuration loaded");

    let session = Arc::new(config.token.clone().map_or_else(InMemorySession::new, InMemorySession::with_token));
    let api = HttpBookingApi::new(&config, session)?;
    let lifecycle = BookingLifecycle::new(BookingRepository::new(api));

    if let Err(error) = run(&lifecycle, cli.command).await {
        eprintln!("error: {}", error.user_message());
        tracing::debug!(kind = %error.kind(), message = error.message(), "Command failed");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(lifecycle: &BookingLifecycle<HttpBookingApi>, command: Command) -> Result<(), BookingError> {
    let repository = lifecycle.repository();
    match command {
        Command::List => {
            let bookings = repository.list_mine().await?;
            if bookings.is_empty() {
                println!("No bookings");
            }
            for booking in &bookings {
                print_summary(booking);
            }
        }
        Command::Show { id } => {
            print_detail(&repository.detail(BookingId::new(id)).await?);
        }
        Command::Pay { id } => {
            let current = repository.detail(BookingId::new(id)).await?;
            print_detail(&lifecycle.request_payment(&current.booking).await?);
        }
        Command::Cancel { id } => {
            let current = repository.detail(BookingId::new(id)).await?;
            print_summary(&lifecycle.request_cancel(&current.booking).await?);
        }
    }
    Ok(())
}

fn print_summary(booking: &Booking) {
    println!(
        "#{:<6} {:<9} {:>3} tickets  Rp {:>12}  {}",
        booking.booking_id,
        booking.status.to_string(),
        booking.total_tickets(),
        booking.total_price.to_string(),
        booking.event_title
    );
}

fn print_detail(detail: &BookingDetail) {
    let booking = &detail.booking;
    print_summary(booking);
    println!("  created {}", booking.created_at.to_rfc3339());
    for item in &booking.items {
        println!(
            "  {} x{} @ {} = {}",
            item.ticket_name, item.quantity, item.price, item.subtotal
        );
    }
    if let Some(paid_at) = detail.paid_at {
        println!("  paid    {}", paid_at.to_rfc3339());
    }
    if let Some(qr) = detail.qr_code.as_deref() {
        println!("  qr      {} bytes (base64)", qr.len());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["bookings", "pay", "42"]).unwrap();
        assert_eq!(cli.command, Command::Pay { id: 42 });

        let cli = Cli::try_parse_from(["bookings", "list"]).unwrap();
        assert_eq!(cli.command, Command::List);
    }

    #[test]
    fn test_non_numeric_id_rejected() {
        assert!(Cli::try_parse_from(["bookings", "pay", "abc"]).is_err());
        assert!(Cli::try_parse_from(["bookings", "show"]).is_err());
    }
}
