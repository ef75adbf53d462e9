//! Recorded trip distance.
//!
//! Distances arrive from entry forms and bulk imports, so the field may be a
//! number, a numeric string, blank, or garbage. Parsing never fails: anything
//! unusable is kept verbatim as [`Distance::Invalid`] so the engine can price it
//! as zero and report it.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Distance in kilometres as recorded on a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Distance {
    /// No distance recorded.
    #[default]
    Missing,
    /// A numeric distance. May be negative if the source recorded one.
    Recorded(Decimal),
    /// A value that is not a number, kept as written.
    Invalid(String),
}

impl Distance {
    /// Creates a recorded distance.
    #[must_use]
    pub const fn km(value: Decimal) -> Self {
        Self::Recorded(value)
    }

    /// Kilometres to price. Missing, negative and invalid distances price as zero.
    #[must_use]
    pub fn billable_km(&self) -> Decimal {
        match self {
            Self::Recorded(km) if km.is_sign_positive() => *km,
            _ => Decimal::ZERO,
        }
    }

    /// Returns the raw value when the distance is unusable (negative or non-numeric).
    ///
    /// A missing distance is not an error and returns `None`.
    #[must_use]
    pub fn invalid_value(&self) -> Option<String> {
        match self {
            Self::Recorded(km) if km.is_sign_negative() && !km.is_zero() => Some(km.to_string()),
            Self::Invalid(raw) => Some(raw.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Recorded(km) => write!(f, "{km}"),
            Self::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Distance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Missing => serializer.serialize_none(),
            Self::Recorded(km) => Serialize::serialize(km, serializer),
            Self::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

struct DistanceVisitor;

impl<'de> Visitor<'de> for DistanceVisitor {
    type Value = Distance;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a distance in kilometres")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Distance, E> {
        Ok(Distance::Recorded(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Distance, E> {
        Ok(Distance::Recorded(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Distance, E> {
        Ok(Decimal::try_from(v)
            .map_or_else(|_| Distance::Invalid(v.to_string()), Distance::Recorded))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Distance, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(Distance::Missing);
        }
        Ok(Decimal::from_str(trimmed)
            .map_or_else(|_| Distance::Invalid(v.to_owned()), Distance::Recorded))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Distance, E> {
        Ok(Distance::Invalid(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Distance, E> {
        Ok(Distance::Missing)
    }

    fn visit_none<E: de::Error>(self) -> Result<Distance, E> {
        Ok(Distance::Missing)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Distance, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DistanceVisitor)
    }
}
