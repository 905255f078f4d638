//! Serde adapters for optional fields posted by HTML forms.
//!
//! Form inputs the user never touched arrive as `""` rather than being omitted,
//! so optional fields treat blank strings the same as a missing value.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

/// Deserializes an optional value, mapping `null`, `""` and whitespace to `None`.
///
/// Use together with `#[serde(default)]` so a missing key also yields `None`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// Deserializes a field whose presence matters: a missing key stays `None`
/// (via `#[serde(default)]`), while an explicit `null` or blank becomes `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    blank_as_none(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::domain::types::{EmailAddress, SiteId};

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "blank_as_none")]
        email: Option<EmailAddress>,
        #[serde(default, deserialize_with = "nullable")]
        site_id: Option<Option<SiteId>>,
    }

    #[test]
    fn blank_strings_are_absent() {
        let probe: Probe = serde_json::from_str(r#"{"email": "   "}"#).unwrap();
        assert!(probe.email.is_none());
        assert!(probe.site_id.is_none());

        let probe: Probe = serde_json::from_str(r#"{"email": null}"#).unwrap();
        assert!(probe.email.is_none());
    }

    #[test]
    fn present_values_are_parsed() {
        let probe: Probe = serde_json::from_str(r#"{"email": "Ops@Example.com"}"#).unwrap();
        assert_eq!(probe.email.unwrap().as_str(), "ops@example.com");

        let err = serde_json::from_str::<Probe>(r#"{"email": "ops"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid email address"));
    }

    #[test]
    fn nullable_separates_null_from_missing() {
        let cleared: Probe = serde_json::from_str(r#"{"site_id": null}"#).unwrap();
        assert_eq!(cleared.site_id, Some(None));

        let set: Probe =
            serde_json::from_str(r#"{"site_id": "0b5c7d4e-1f2a-4b3c-8d9e-0f1a2b3c4d5e"}"#).unwrap();
        assert!(matches!(set.site_id, Some(Some(_))));

        let untouched: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(untouched.site_id, None);
    }
}
