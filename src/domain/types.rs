//! Strongly-typed value objects used by the schema records.
//!
//! These wrappers enforce basic invariants (non-nil identifiers, normalized and
//! validated email, bounded non-empty text) at deserialization time, so once a
//! payload decodes its values can be treated as trusted.
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is the nil UUID.
    #[error("id must not be the nil uuid")]
    NilId,
    /// Provided identifier is not a UUID.
    #[error("invalid uuid value")]
    InvalidUuid,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string is longer than the field allows.
    #[error("value must be at most {max} characters")]
    TooLong { max: usize },
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Trims the input and checks it against an upper bound in characters.
fn bounded_non_empty<S: Into<String>>(value: S, max: usize) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    if trimmed.chars().count() > max {
        return Err(TypeConstraintError::TooLong { max });
    }
    Ok(trimmed)
}

/// Macro to generate identifier newtypes backed by a non-nil UUID.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "Uuid", into = "Uuid")]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID, rejecting the nil value.
            pub fn from_uuid(value: Uuid) -> Result<Self, TypeConstraintError> {
                if value.is_nil() {
                    Err(TypeConstraintError::NilId)
                } else {
                    Ok(Self(value))
                }
            }

            /// Returns the UUID backing this identifier.
            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = Uuid::parse_str(s.trim()).map_err(|_| TypeConstraintError::InvalidUuid)?;
                Self::from_uuid(value)
            }
        }

        impl TryFrom<Uuid> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: Uuid) -> Result<Self, Self::Error> {
                Self::from_uuid(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for a user account.");
id_newtype!(CustomerId, "Unique identifier for a customer.");
id_newtype!(SiteId, "Unique identifier for a customer site.");
id_newtype!(AssetId, "Unique identifier for an asset installed at a site.");
id_newtype!(JobId, "Unique identifier for a job.");
id_newtype!(QuoteId, "Unique identifier for a quote.");
id_newtype!(InvoiceId, "Unique identifier for an invoice.");
id_newtype!(PartId, "Unique identifier for a stocked part.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for EmailAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for EmailAddress {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

macro_rules! bounded_string_newtype {
    ($name:ident, $max:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Longest accepted value, in characters.
            pub const MAX_CHARS: usize = $max;

            /// Constructs a trimmed, non-empty value within the length bound.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                Ok(Self(bounded_non_empty(value, Self::MAX_CHARS)?))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_string_newtype!(PersonName, 100, "Name of a person (user, site contact, signatory).");
bounded_string_newtype!(CompanyName, 200, "Registered or trading name of a customer.");
bounded_string_newtype!(SiteName, 200, "Display name of a customer site.");
bounded_string_newtype!(AssetName, 200, "Display name of an installed asset.");
bounded_string_newtype!(PartNumber, 64, "Supplier or internal part number.");
bounded_string_newtype!(PartName, 200, "Display name of a stocked part.");
bounded_string_newtype!(
    PhoneNumber,
    32,
    "Contact telephone number as entered, trimmed and non-empty."
);

/// Removes HTML tags, dropping script and style content, and keeps the text as typed.
///
/// Text without a `<` cannot hold markup and is returned untouched.
fn strip_markup(value: String) -> String {
    if !value.contains('<') {
        return value;
    }
    let cleaned = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(&value)
        .to_string();
    // ammonia re-encodes the text it keeps.
    cleaned
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Free-form text with markup stripped, trimmed and non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct FreeText(String);

impl FreeText {
    /// Longest accepted value, in characters, after sanitizing.
    pub const MAX_CHARS: usize = 5000;

    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Ok(Self(bounded_non_empty(strip_markup(value.into()), Self::MAX_CHARS)?))
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for FreeText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for FreeText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for FreeText {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FreeText {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for FreeText {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<FreeText> for String {
    fn from(value: FreeText) -> Self {
        value.0
    }
}

/// Wall-clock time of day, exchanged as `HH:MM`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parses `HH:MM`, also accepting `HH:MM:SS` and dropping the seconds.
    pub fn new<S: AsRef<str>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.as_ref().trim();
        let time = NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| TypeConstraintError::InvalidValue(format!("{raw:?} is not a HH:MM time")))?;
        Ok(Self(time.with_second(0).unwrap_or(time)))
    }

    /// Returns the wrapped time of day.
    pub const fn get(self) -> NaiveTime {
        self.0
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(value: NaiveTime) -> Self {
        let minute = NaiveTime::from_hms_opt(value.hour(), value.minute(), 0);
        Self(minute.unwrap_or(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_rejects_nil_uuid() {
        assert_eq!(
            CustomerId::from_uuid(Uuid::nil()),
            Err(TypeConstraintError::NilId)
        );
        assert_eq!(
            "not-a-uuid".parse::<SiteId>(),
            Err(TypeConstraintError::InvalidUuid)
        );
    }

    #[test]
    fn id_roundtrips_through_display() {
        let id = JobId::new();
        let parsed: JobId = id.to_string().parse().expect("valid job id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = EmailAddress::new("  Office@Craven-Cooling.co.uk ").expect("valid email");
        assert_eq!(email.as_str(), "office@craven-cooling.co.uk");
        assert_eq!(
            EmailAddress::new("not an email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn bounded_strings_enforce_limits() {
        assert_eq!(
            PersonName::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
        let long = "x".repeat(PartNumber::MAX_CHARS + 1);
        assert_eq!(
            PartNumber::new(long),
            Err(TypeConstraintError::TooLong { max: 64 })
        );
        let name = CompanyName::new(" Northern Foods Ltd ").expect("valid company name");
        assert_eq!(&*name, "Northern Foods Ltd");
    }

    #[test]
    fn free_text_strips_markup() {
        let text = FreeText::new("<script>alert(1)</script>Keys at reception").expect("valid text");
        assert_eq!(text.as_str(), "Keys at reception");
        assert_eq!(
            FreeText::new("<script>drop()</script>  "),
            Err(TypeConstraintError::EmptyString)
        );
        let text = FreeText::new("Fan <b>seized</b>, <style>p{}</style>replaced").expect("valid text");
        assert_eq!(text.as_str(), "Fan seized, replaced");
    }

    #[test]
    fn free_text_keeps_plain_text_verbatim() {
        for raw in ["R&D, temp < -18C", "Smith & Co Estate", "Keep below < -18C & > -25C"] {
            assert_eq!(FreeText::new(raw).expect("valid text").as_str(), raw);
        }
        let decoded: FreeText = serde_json::from_str("\"R&D, temp < -18C\"").expect("valid text");
        assert_eq!(serde_json::to_string(&decoded).unwrap(), "\"R&D, temp < -18C\"");
    }

    #[test]
    fn clock_time_uses_hours_and_minutes() {
        let time = ClockTime::new("09:00").expect("valid time");
        assert_eq!(time.to_string(), "09:00");
        let with_seconds: ClockTime = "14:30:59".parse().expect("valid time");
        assert_eq!(String::from(with_seconds), "14:30");
        assert!(ClockTime::new("25:00").is_err());
        assert!(ClockTime::new("noon").is_err());
    }

    #[test]
    fn deserialization_goes_through_constructors() {
        let err = serde_json::from_str::<EmailAddress>("\"nope\"").unwrap_err();
        assert!(err.to_string().contains("invalid email address"));

        let id: UserId = serde_json::from_str("\"7f3b6a52-3f0e-4d8e-9a1c-2b1f9e4b7c10\"")
            .expect("valid user id");
        assert_eq!(id.to_string(), "7f3b6a52-3f0e-4d8e-9a1c-2b1f9e4b7c10");

        assert!(serde_json::from_str::<UserId>("\"00000000-0000-0000-0000-000000000000\"").is_err());
    }
}
