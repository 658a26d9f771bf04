//! Tolerant numeric fields for invoice API payloads.
//!
//! Form-backed payloads send numbers as JSON numbers, numeric strings,
//! empty strings or `null`, or leave them out entirely. Everything except a
//! number or a numeric string reads as "no value"; a string that is not a
//! number is an error.
//!
//! Every field is capped at [`MAX_MAGNITUDE`]; the record layer applies the
//! same cap to derived line amounts.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Largest absolute value accepted for any numeric field.
pub const MAX_MAGNITUDE: Decimal = dec!(1_000_000_000_000);

fn bounded<E: de::Error>(value: Decimal) -> Result<Option<Decimal>, E> {
    if value.abs() > MAX_MAGNITUDE {
        return Err(E::custom(format!("{value} exceeds {MAX_MAGNITUDE}")));
    }
    Ok(Some(value))
}

pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    // `Decimal` has an inherent `serialize` returning its raw bytes.
    Serialize::serialize(value, serializer)
}

/// Missing values read as zero.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    Ok(deserializer
        .deserialize_any(LenientDecimal)?
        .unwrap_or(Decimal::ZERO))
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        Serialize::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        deserializer.deserialize_any(LenientDecimal)
    }
}

/// `null` reads as the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

struct LenientDecimal;

impl<'de> Visitor<'de> for LenientDecimal {
    type Value = Option<Decimal>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string, an empty string or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        bounded(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        bounded(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        let value =
            Decimal::try_from(v).map_err(|_| E::custom(format!("number {v} is out of range")))?;
        bounded(value)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| E::custom(format!("'{v}' is not a number")))?;
        bounded(value)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}
