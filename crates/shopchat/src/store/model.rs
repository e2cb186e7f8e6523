use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// An amount of money in grosze (1/100 PLN).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    /// No money at all.
    pub const ZERO: Money = Money(0);

    /// Creates an amount from grosze.
    #[inline]
    pub const fn from_grosze(grosze: u64) -> Self {
        Money(grosze)
    }

    /// Creates an amount from whole zloty.
    #[inline]
    pub const fn from_pln(pln: u64) -> Self {
        Money(pln.saturating_mul(100))
    }

    /// Returns the amount in grosze.
    #[inline]
    pub const fn grosze(self) -> u64 {
        self.0
    }

    /// Returns the value of `quantity` items priced at `self`.
    #[inline]
    pub fn times(self, quantity: u32) -> Self {
        Money(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Formats the amount with two decimals, e.g. `1234.50`.
impl Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Serialized as a number of zloty. Whole amounts stay integers, so a
/// generated price of 1234 PLN is `1234`, not `1234.0`.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_u64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

/// A registered client of the shop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Sequential identifier, starting at 1.
    pub id: u64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number with the country prefix.
    pub phone: String,
    /// The day the client registered.
    pub registration_date: NaiveDate,
}

impl Client {
    /// Returns `"<first name> <last name>"`.
    #[inline]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A client that is not stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub registration_date: NaiveDate,
}

/// The lifecycle state of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum OrderStatus {
    New,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::New,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Returns the upper-case name, e.g. `SHIPPED`.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no [`OrderStatus`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    /// Parses a status name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStatusError(s.to_owned()))
    }
}

/// An order placed by a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    /// Sequential identifier, starting at 1.
    pub id: u64,
    /// Name of the ordered product.
    pub product_name: String,
    /// Number of ordered items.
    pub quantity: u32,
    /// Unit price.
    pub price: Money,
    /// When the order was placed.
    pub order_date: NaiveDateTime,
    /// Current status.
    pub status: OrderStatus,
    /// The client who placed the order.
    pub client_id: u64,
}

impl Order {
    /// Returns the value of the whole order.
    #[inline]
    pub fn value(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// An order that is not stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewOrder {
    pub product_name: String,
    pub quantity: u32,
    pub price: Money,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
    pub client_id: u64,
}
