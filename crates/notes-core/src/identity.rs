//! Caller identity for note ownership.
//!
//! An [`OwnerId`] is the opaque principal every note is scoped to. In token
//! mode it is the registered user's UUID; in header mode it is whatever the
//! caller sent in `X-User-Id`. Equality on this value is the only
//! authorization check in the system.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::UserId;

/// Maximum length of an owner identity in bytes.
pub const MAX_OWNER_ID_LEN: usize = 200;

/// Opaque identity a note belongs to.
///
/// Always non-blank and free of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

/// Reasons a raw value cannot be used as an owner identity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwnerIdError {
    #[error("owner identity is blank")]
    Blank,

    #[error("owner identity exceeds {MAX_OWNER_ID_LEN} bytes (got {0})")]
    TooLong(usize),
}

impl OwnerId {
    /// Build an owner identity from a caller-supplied value.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, OwnerIdError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(OwnerIdError::Blank);
        }
        if trimmed.len() > MAX_OWNER_ID_LEN {
            return Err(OwnerIdError::TooLong(trimmed.len()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Owner identity of a registered user.
    #[must_use]
    pub fn from_user(user_id: UserId) -> Self {
        Self(user_id.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OwnerId {
    type Error = OwnerIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OwnerId> for String {
    fn from(value: OwnerId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let owner = OwnerId::new("  u1 ").unwrap();
        assert_eq!(owner.as_str(), "u1");
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(OwnerId::new(""), Err(OwnerIdError::Blank));
        assert_eq!(OwnerId::new(" \t "), Err(OwnerIdError::Blank));
    }

    #[test]
    fn rejects_oversized() {
        let raw = "x".repeat(MAX_OWNER_ID_LEN + 1);
        assert_eq!(
            OwnerId::new(&raw),
            Err(OwnerIdError::TooLong(MAX_OWNER_ID_LEN + 1))
        );
    }

    #[test]
    fn user_owner_is_uuid_string() {
        let user_id = UserId::new();
        assert_eq!(user_id.owner_id().as_str(), user_id.to_string());
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<OwnerId>("\"   \"").is_err());
        let owner: OwnerId = serde_json::from_str("\"u2\"").unwrap();
        assert_eq!(owner.as_str(), "u2");
    }
}
