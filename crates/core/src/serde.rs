//! Serde helper functions for query strings and loosely typed JSON.
//!
//! Query strings arrive with empty values for unset fields, and seed files
//! mix numbers and strings for the same attribute.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize a string that may have been written as a JSON number.
pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Integer(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        value: Option<String>,
    }

    #[derive(Deserialize)]
    struct Price {
        #[serde(deserialize_with = "deserialize_string_or_number")]
        price: String,
    }

    #[test]
    fn test_optional_string_empty_is_none() {
        let q: Query = serde_json::from_str(r#"{"value":""}"#).unwrap();
        assert_eq!(q.value, None);
    }

    #[test]
    fn test_optional_string_missing_is_none() {
        let q: Query = serde_json::from_str("{}").unwrap();
        assert_eq!(q.value, None);
    }

    #[test]
    fn test_optional_string_keeps_value() {
        let q: Query = serde_json::from_str(r#"{"value":"kitten"}"#).unwrap();
        assert_eq!(q.value.as_deref(), Some("kitten"));
    }

    #[test]
    fn test_string_or_number() {
        let p: Price = serde_json::from_str(r#"{"price":"12"}"#).unwrap();
        assert_eq!(p.price, "12");
        let p: Price = serde_json::from_str(r#"{"price":12}"#).unwrap();
        assert_eq!(p.price, "12");
        let p: Price = serde_json::from_str(r#"{"price":12.5}"#).unwrap();
        assert_eq!(p.price, "12.5");
    }
}
