//! Destination phone numbers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// A dialable destination token.
///
/// The only validation applied is that the token is not blank; formatting is
/// left to the telephony provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a number, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` if the number is blank.
    pub fn parse(raw: impl Into<String>) -> Result<Self, AppError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "phone number cannot be empty".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    /// Borrow the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

/// Parse a batch of raw numbers, failing on the first blank entry.
///
/// # Errors
///
/// Returns `AppError::InvalidInput` if any entry is blank.
pub fn parse_all<I, S>(raw: I) -> Result<Vec<PhoneNumber>, AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    raw.into_iter().map(PhoneNumber::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_any_non_blank_token() {
        assert_eq!(
            PhoneNumber::parse("+15551234567").unwrap().as_str(),
            "+15551234567"
        );
        // Formatting is not normalized
        assert_eq!(PhoneNumber::parse("555 0100").unwrap().as_str(), "555 0100");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(matches!(
            PhoneNumber::parse(""),
            Err(AppError::InvalidInput(_))
        ));
        assert!(PhoneNumber::parse("   ").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Vec<PhoneNumber> = serde_json::from_str(r#"["+1555","+1666"]"#).unwrap();
        assert_eq!(ok.len(), 2);

        let err = serde_json::from_str::<Vec<PhoneNumber>>(r#"["+1555",""]"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let number = PhoneNumber::parse("+15551234567").unwrap();
        assert_eq!(serde_json::to_string(&number).unwrap(), r#""+15551234567""#);
    }
}
