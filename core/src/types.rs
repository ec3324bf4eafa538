//! Domain types for the event booking client.
//!
//! Everything here mirrors what the booking API sends and receives. Values
//! are treated as immutable snapshots: the server owns bookings, and the
//! client replaces its copy after every action instead of patching it.

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::BookingError;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw id as returned by the API
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw id
            #[must_use]
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Unique identifier for an event
    EventId
);

numeric_id!(
    /// Unique identifier for a ticket type within an event
    TicketId
);

numeric_id!(
    /// Unique identifier for a booking, assigned by the server
    BookingId
);

// ============================================================================
// Money Value Object (minor-unit based to avoid floating point errors)
// ============================================================================

/// Number of minor units in one major unit (two decimal places).
const MINOR_PER_MAJOR: u64 = 100;

/// Upper bound (exclusive) on minor units carried as a JSON float.
///
/// Decimals of up to 15 significant digits survive an `f64` round trip
/// unchanged; anything larger may already have been rounded by the JSON
/// parser and is rejected.
pub const MAX_FLOAT_MINOR_UNITS: u64 = 1_000_000_000_000_000;

/// Errors raised while parsing a decimal amount into [`Money`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// Empty input
    #[error("amount is empty")]
    Empty,

    /// Amount below zero
    #[error("amount must not be negative: {0}")]
    Negative(String),

    /// Input is not a plain decimal number
    #[error("amount is not a decimal number: {0}")]
    InvalidDigits(String),

    /// More than two significant fractional digits
    #[error("amount has more than two decimal places: {0}")]
    TooPrecise(String),

    /// Amount does not fit in the minor-unit range
    #[error("amount is out of range: {0}")]
    Overflow(String),

    /// Fractional amount too large to carry exactly as a JSON float
    #[error("amount exceeds exact float precision: {0}")]
    Imprecise(String),
}

/// Represents a non-negative amount in minor units (hundredths).
///
/// The API sends prices as JSON decimals. They are converted through their
/// decimal text, so `49999.99` becomes exactly `4_999_999` minor units and
/// sums never drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from minor units
    #[must_use]
    pub const fn from_minor_units(units: u64) -> Self {
        Self(units)
    }

    /// Creates a `Money` value from whole major units with overflow checking
    #[must_use]
    pub const fn checked_from_major_units(major: u64) -> Option<Self> {
        match major.checked_mul(MINOR_PER_MAJOR) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }

    /// Returns the amount in minor units
    #[must_use]
    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    /// Returns the whole major units (fraction dropped)
    #[must_use]
    pub const fn major_units(&self) -> u64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Multiplies the amount by a quantity with overflow checking
    #[must_use]
    pub const fn checked_multiply(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Sums amounts, returning `None` on overflow
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }

    /// Parses a plain decimal string such as `"49999.99"` or `"100000"`.
    ///
    /// Trailing fractional zeros are ignored, so `"10.500"` is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyParseError`] for empty, negative, non-numeric,
    /// over-precise or out-of-range input.
    pub fn parse(text: &str) -> Result<Self, MoneyParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        if text.starts_with('-') {
            return Err(MoneyParseError::Negative(text.to_string()));
        }

        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(MoneyParseError::InvalidDigits(text.to_string()));
        }

        let significant = fraction.trim_end_matches('0');
        if significant.len() > 2 {
            return Err(MoneyParseError::TooPrecise(text.to_string()));
        }

        let overflow = || MoneyParseError::Overflow(text.to_string());
        let major: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let minor: u64 = format!("{significant:0<2}").parse().map_err(|_| overflow())?;

        major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|units| units.checked_add(minor))
            .map(Self)
            .ok_or_else(overflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_PER_MAJOR,
            self.0 % MINOR_PER_MAJOR
        )
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Money {
    #[allow(clippy::cast_precision_loss)] // Bounded by MAX_FLOAT_MINOR_UNITS, so the shortest repr round-trips
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % MINOR_PER_MAJOR == 0 {
            serializer.serialize_u64(self.0 / MINOR_PER_MAJOR)
        } else if self.0 < MAX_FLOAT_MINOR_UNITS {
            serializer.serialize_f64(self.0 as f64 / MINOR_PER_MAJOR as f64)
        } else {
            Err(ser::Error::custom(MoneyParseError::Imprecise(self.to_string())))
        }
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative decimal amount")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
        Money::checked_from_major_units(value)
            .ok_or_else(|| E::custom(MoneyParseError::Overflow(value.to_string())))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
        u64::try_from(value)
            .map_err(|_| E::custom(MoneyParseError::Negative(value.to_string())))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
        if !value.is_finite() {
            return Err(E::custom(MoneyParseError::InvalidDigits(value.to_string())));
        }
        // Display for f64 yields the shortest decimal that round-trips, never exponent form
        let text = value.to_string();
        let money = Money::parse(&text).map_err(E::custom)?;
        if money.0 >= MAX_FLOAT_MINOR_UNITS {
            return Err(E::custom(MoneyParseError::Imprecise(text)));
        }
        Ok(money)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
        Money::parse(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

// ============================================================================
// Tickets
// ============================================================================

/// A purchasable ticket type offered by an event, as fetched from the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Ticket type id
    pub ticket_id: TicketId,
    /// Display name ("VIP", "Regular")
    pub ticket_name: String,
    /// Unit price
    pub price: Money,
    /// Remaining inventory at fetch time
    #[serde(alias = "quantity")]
    pub available_quantity: u32,
}

impl Ticket {
    /// Creates a new `Ticket`
    #[must_use]
    pub fn new(
        ticket_id: TicketId,
        ticket_name: impl Into<String>,
        price: Money,
        available_quantity: u32,
    ) -> Self {
        Self {
            ticket_id,
            ticket_name: ticket_name.into(),
            price,
            available_quantity,
        }
    }
}

// ============================================================================
// Bookings
// ============================================================================

/// Booking status as reported by the server
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Created, awaiting payment
    Pending,
    /// Paid; carries a QR code
    Paid,
    /// Cancelled before payment
    #[serde(alias = "CANCELED")]
    Cancelled,
}

impl BookingStatus {
    /// Returns the wire representation of the status
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns true if no further transition is possible
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "CANCELLED" | "CANCELED" => Ok(Self::Cancelled),
            other => Err(BookingError::invalid_state(format!(
                "unknown booking status {other}"
            ))),
        }
    }
}

/// One ticket line inside a booking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingItem {
    /// Ticket type id
    pub ticket_id: TicketId,
    /// Ticket type name at booking time
    pub ticket_name: String,
    /// Number of tickets of this type
    pub quantity: u32,
    /// Unit price
    pub price: Money,
    /// `quantity × price` as computed by the server
    pub subtotal: Money,
}

impl BookingItem {
    /// Returns true if `subtotal == quantity × price`
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.price.checked_multiply(self.quantity) == Some(self.subtotal)
    }
}

/// A booking snapshot as returned by the server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Server-assigned id
    pub booking_id: BookingId,
    /// Title of the booked event
    pub event_title: String,
    /// Ticket lines
    #[serde(default)]
    pub items: Vec<BookingItem>,
    /// Sum of item subtotals
    pub total_price: Money,
    /// Lifecycle status
    pub status: BookingStatus,
    /// Creation time
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Total number of tickets across all items
    #[must_use]
    pub fn total_tickets(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |total, item| total.saturating_add(item.quantity))
    }

    /// Returns true if every item subtotal is correct and the total matches their sum
    #[must_use]
    pub fn totals_consistent(&self) -> bool {
        self.items.iter().all(BookingItem::is_consistent)
            && Money::checked_sum(self.items.iter().map(|item| item.subtotal))
                == Some(self.total_price)
    }
}

/// A booking plus payment details
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    /// The booking itself
    #[serde(flatten)]
    pub booking: Booking,
    /// Payment time, present iff paid
    #[serde(default, with = "timestamp::option")]
    pub paid_at: Option<DateTime<Utc>>,
    /// Base64 image payload, present iff paid
    #[serde(default)]
    pub qr_code: Option<String>,
}

impl BookingDetail {
    /// Current status of the booking
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.booking.status
    }

    /// Returns true if the payment fields are present exactly when the booking is paid
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let paid = self.booking.status == BookingStatus::Paid;
        let has_qr = self.qr_code.as_deref().is_some_and(|qr| !qr.is_empty());
        paid == self.paid_at.is_some() && paid == has_qr
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Serde helpers for API timestamps.
///
/// Accepts RFC 3339, or a zone-less local datetime which is taken as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    /// Parses an API timestamp
    ///
    /// # Errors
    ///
    /// Returns the last parse error if no supported format matches.
    pub fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        let text = text.trim();
        let mut last = match DateTime::parse_from_rfc3339(text) {
            Ok(parsed) => return Ok(parsed.with_timezone(&Utc)),
            Err(e) => e,
        };
        for format in LOCAL_FORMATS {
            match NaiveDateTime::parse_from_str(text, format) {
                Ok(naive) => return Ok(naive.and_utc()),
                Err(e) => last = e,
            }
        }
        Err(last)
    }

    /// Serializes as RFC 3339
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    /// Deserializes from any supported format
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string in a supported format.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module, for optional fields
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serializes as RFC 3339 or null
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional timestamp; null and empty strings are `None`
        ///
        /// # Errors
        ///
        /// Fails if a non-empty value is not in a supported format.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(text) if !text.trim().is_empty() => {
                    super::parse(&text).map(Some).map_err(serde::de::Error::custom)
                }
                _ => Ok(None),
            }
        }
    }
}
