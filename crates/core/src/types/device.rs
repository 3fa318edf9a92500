//! Device identifier type.
//!
//! Device IDs are printed on the hardware at manufacturing time and typed in
//! by users during registration. They are never generated by this system, so
//! unlike the UUID-based entity IDs they are plain strings with light
//! normalization.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DeviceId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum DeviceIdError {
    /// The input string is empty (after trimming).
    #[error("device ID cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("device ID must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A device identifier as printed on a Nivara unit.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed (users copy these from a sticker)
/// - Must be non-empty after trimming
/// - At most 64 characters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Maximum length of a device identifier.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `DeviceId` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty after trimming or longer than
    /// 64 characters.
    pub fn parse(s: &str) -> Result<Self, DeviceIdError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(DeviceIdError::Empty);
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(DeviceIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the device ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `DeviceId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DeviceId {
    type Err = DeviceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for DeviceId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for DeviceId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for DeviceId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id = DeviceId::parse("NIV-2024-00417").unwrap();
        assert_eq!(id.as_str(), "NIV-2024-00417");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = DeviceId::parse("  NIV-2024-00417\n").unwrap();
        assert_eq!(id.as_str(), "NIV-2024-00417");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(DeviceId::parse(""), Err(DeviceIdError::Empty)));
        assert!(matches!(DeviceId::parse("   "), Err(DeviceIdError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "x".repeat(65);
        assert!(matches!(
            DeviceId::parse(&long),
            Err(DeviceIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = DeviceId::parse("NIV-001").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"NIV-001\"");

        let parsed: DeviceId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
