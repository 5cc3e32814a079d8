//! Serde helpers that coerce loosely-typed wire values into integers.
//!
//! The backend stores some numeric fields as decimals, so the same value can
//! arrive as `3`, `3.0`, `"3"` or `"3.00"`. `null` and `""` mean "absent".

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumOrText {
    /// `Ok(None)` for blank text; `Err` for anything that is not a whole number.
    fn to_int(&self) -> Result<Option<i64>, String> {
        match self {
            NumOrText::Int(n) => Ok(Some(*n)),
            NumOrText::Float(f) => float_to_int(*f).map(Some),
            NumOrText::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                if let Ok(n) = s.parse::<i64>() {
                    return Ok(Some(n));
                }
                match s.parse::<f64>() {
                    Ok(f) => float_to_int(f).map(Some),
                    Err(_) => Err(format!("expected a number, got '{s}'")),
                }
            }
        }
    }
}

fn float_to_int(f: f64) -> Result<i64, String> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(format!("expected a whole number, got {f}"))
    }
}

/// Optional scalar: number, numeric string, `null`, or blank string.
pub fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumOrText>::deserialize(deserializer)? {
        Some(value) => value.to_int().map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// List of numbers or numeric strings; `null` is an empty list.
pub fn int_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<NumOrText>>::deserialize(deserializer)?.unwrap_or_default();
    raw.iter()
        .map(|value| match value.to_int() {
            Ok(Some(n)) => Ok(n),
            Ok(None) => Err(de::Error::custom("blank entry in number list")),
            Err(e) => Err(de::Error::custom(e)),
        })
        .collect()
}

/// List of strings; `null` is an empty list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
