//! Lenient deserializers for money fields.
//!
//! Older documents store amounts as `"1200.00"` strings and may hold `null`
//! where a number failed to parse. Amounts are always written back as numbers.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Number(f64),
    String(String),
}

fn parse<E: Error>(input: AmountInput) -> Result<f64, E> {
    let value = match input {
        AmountInput::Number(value) => value,
        AmountInput::String(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| E::custom(format!("amount '{raw}' is not a number")))?,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(E::custom("amount must be a finite number"))
    }
}

/// A number or a numeric string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    parse(AmountInput::deserialize(deserializer)?)
}

/// Like [`deserialize`], but `null` reads as 0.
pub fn deserialize_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AmountInput>::deserialize(deserializer)? {
        Some(input) => parse(input),
        None => Ok(0.0),
    }
}

/// Optional field: `null` reads as `Some(0.0)`. Pair with `#[serde(default)]`
/// so that an absent field stays `None`.
pub fn deserialize_present_or_zero<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_or_zero(deserializer).map(Some)
}
