//! Common ID Types
//!
//! Type-safe ID wrappers for handles that cross the API boundary.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type LoginSessionId = Id<markers::LoginSession>;
/// let id = LoginSessionId::new();
/// let parsed: LoginSessionId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Rebuild from raw bytes (e.g. a decoded token)
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self::from_uuid(Uuid::from_bytes(bytes))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Raw bytes, used as MAC input when the ID is signed
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.value.as_bytes()
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Error returned when a client-supplied handle is not a UUID
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed identifier")]
pub struct IdParseError;

impl<T> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self::from_uuid)
            .map_err(|_| IdParseError)
    }
}

/// Marker types for different IDs
pub mod markers {
    /// Marker for pending login session handles
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LoginSession;

    /// Marker for issued access tokens
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessToken;
}

pub type LoginSessionId = Id<markers::LoginSession>;
pub type AccessTokenId = Id<markers::AccessToken>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_through_string() {
        let id = LoginSessionId::new();
        let parsed: LoginSessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert_eq!("not-a-session".parse::<LoginSessionId>(), Err(IdParseError));
        assert_eq!("".parse::<LoginSessionId>(), Err(IdParseError));
    }

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = AccessTokenId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(id.as_bytes(), uuid.as_bytes());
        assert_eq!(AccessTokenId::from_bytes(*uuid.as_bytes()), id);
    }
}
