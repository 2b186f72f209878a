//! Property records and the monetary price type.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// == Price ==
/// Non-negative decimal amount with two fractional digits, held as cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

/// Why a price string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid price '{0}': expected a non-negative amount with at most two decimals")]
pub struct ParsePriceError(String);

impl FromStr for Price {
    type Err = ParsePriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsePriceError(s.to_string());
        let trimmed = s.trim();
        let (whole, frac) = match trimmed.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some(parts) => parts,
            None => (trimmed, ""),
        };

        if whole.is_empty()
            || frac.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac))
            .map(Price)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Accept both "2500.00" and 2500.00
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

// == Property ==
/// A persisted property listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
    /// Set once when the record is created
    pub created_at: DateTime<Utc>,
}

/// Fields of a listing about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
}

impl NewProperty {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            location: location.into(),
        }
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub location: Option<String>,
}

impl PropertyUpdate {
    /// Applies the present fields to `property`. `id` and `created_at` never change.
    pub fn apply_to(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(description) = self.description {
            property.description = description;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(location) = self.location {
            property.location = location;
        }
    }
}
