//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The value is not a zero-padded `YYYY-MM-DD` date.
    #[error("invalid day key: {value}")]
    InvalidDayKey { value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated child identifier.
    ///
    /// Child IDs are opaque, non-empty and stable for the child's lifetime.
    ChildId, "child ID"
);

/// Format of a [`DayKey`] when rendered or parsed.
const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A local calendar date identifying one attendance day.
///
/// Rendered as zero-padded `YYYY-MM-DD`, so lexical order of the rendered
/// keys matches the chronological order given by `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Returns the calendar date.
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono tolerates padding spaces and signs in numeric fields
        if !has_day_key_shape(s) {
            return Err(ValidationError::InvalidDayKey {
                value: s.to_string(),
            });
        }
        NaiveDate::parse_from_str(s, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDayKey {
                value: s.to_string(),
            })
    }
}

/// Exactly `DDDD-DD-DD` with ASCII digits.
fn has_day_key_shape(s: &str) -> bool {
    s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl TryFrom<String> for DayKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_id_rejects_empty() {
        assert!(ChildId::new("").is_err());
        assert!(ChildId::new("   ").is_err());
        assert!(ChildId::new("k1").is_ok());
    }

    #[test]
    fn child_id_serde_roundtrip() {
        let id = ChildId::new("k1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"k1\"");
        let parsed: ChildId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn child_id_serde_rejects_empty() {
        let result: Result<ChildId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn day_key_renders_zero_padded() {
        let key = DayKey::from(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
        assert_eq!(key.to_string(), "2025-03-07");
    }

    #[test]
    fn day_key_rejects_unpadded_and_garbage() {
        assert!("2025-3-7".parse::<DayKey>().is_err());
        assert!("2025-02-30".parse::<DayKey>().is_err());
        assert!("yesterday".parse::<DayKey>().is_err());
        assert!(" 2025-1-01".parse::<DayKey>().is_err());
        assert!("2025-01- 1".parse::<DayKey>().is_err());
        assert!("2025- 1-01".parse::<DayKey>().is_err());
        assert!("+2025-1-01".parse::<DayKey>().is_err());
        assert!("2025/01/01".parse::<DayKey>().is_err());
        assert!("2025-03-07".parse::<DayKey>().is_ok());
    }

    #[test]
    fn day_key_order_matches_lexical_order() {
        let keys = ["2024-12-31", "2025-01-01", "2025-01-10", "2025-10-02"];
        let parsed: Vec<DayKey> = keys.iter().map(|k| k.parse().unwrap()).collect();
        let mut sorted = parsed.clone();
        sorted.sort();
        assert_eq!(parsed, sorted);
    }

    #[test]
    fn history_keys_with_padding_do_not_alias() {
        let result: Result<std::collections::BTreeMap<DayKey, i32>, _> =
            serde_json::from_str(r#"{"2025-01-01":1," 2025-1-01":2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn day_key_works_as_json_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("2025-01-29".parse::<DayKey>().unwrap(), 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2025-01-29":1}"#);
        let parsed: std::collections::BTreeMap<DayKey, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }
}
