//! Domain Value Objects
//!
//! Immutable value types for the challenge domain.

use crate::error::{ChallengeError, ChallengeResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name the directory records for every OTP round
pub const CUSTOM_CHALLENGE: &str = "CUSTOM_CHALLENGE";

/// One-time code: six decimal digits in `[100000, 999999]`
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub const MIN: u32 = 100_000;
    pub const MAX: u32 = 999_999;
    pub const LENGTH: usize = 6;

    /// Build from a number already drawn from `MIN..=MAX`
    pub(crate) fn from_number(value: u32) -> Self {
        debug_assert!((Self::MIN..=Self::MAX).contains(&value));
        Self(value.to_string())
    }

    /// Whether `s` has the shape of an issued code
    pub fn is_well_formed(s: &str) -> bool {
        s.len() == Self::LENGTH
            && s.bytes().all(|b| b.is_ascii_digit())
            && !s.starts_with('0')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the secret
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

/// Destination identity (email address) a code is delivered to
///
/// Stored verbatim; the directory already normalized it when the user
/// registered, and `publicParams.identity` must echo it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(raw: impl Into<String>) -> ChallengeResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ChallengeError::validation("Missing identity attribute"));
        }
        Ok(Self(raw))
    }

    /// Validate an optional attribute, reporting absence the same way as emptiness
    pub fn from_attribute(raw: Option<String>) -> ChallengeResult<Self> {
        raw.map_or_else(
            || Err(ChallengeError::validation("Missing identity attribute")),
            Self::new,
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of failed rounds after which a login fails permanently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptLimit(u8);

impl AttemptLimit {
    pub const DEFAULT: AttemptLimit = AttemptLimit(3);
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(attempts: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&attempts) {
            Some(Self(attempts))
        } else {
            None
        }
    }

    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

impl Default for AttemptLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Orchestrator outcome for the current history
///
/// Retrying is `Issue` again; there is no separate tag for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Issue,
    Grant,
    Fail,
}

impl Decision {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Decision::Issue => "issue",
            Decision::Grant => "grant",
            Decision::Fail => "fail",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Decision::Grant | Decision::Fail)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_shape() {
        assert!(OtpCode::is_well_formed("482913"));
        assert!(OtpCode::is_well_formed("100000"));
        assert!(!OtpCode::is_well_formed("099999"));
        assert!(!OtpCode::is_well_formed("48291"));
        assert!(!OtpCode::is_well_formed("4829133"));
        assert!(!OtpCode::is_well_formed("48291a"));
        assert!(!OtpCode::is_well_formed(" 48291"));
    }

    #[test]
    fn test_code_debug_is_redacted() {
        let code = OtpCode::from_number(482913);
        assert_eq!(code.as_str(), "482913");
        assert!(!format!("{:?}", code).contains("482913"));
    }

    #[test]
    fn test_identity_requires_content() {
        assert!(Identity::new("user@example.com").is_ok());
        assert!(matches!(
            Identity::new(""),
            Err(ChallengeError::Validation(_))
        ));
        assert!(matches!(
            Identity::new("   "),
            Err(ChallengeError::Validation(_))
        ));
        assert!(matches!(
            Identity::from_attribute(None),
            Err(ChallengeError::Validation(_))
        ));
    }

    #[test]
    fn test_identity_kept_verbatim() {
        let identity = Identity::new("User@Example.com").unwrap();
        assert_eq!(identity.as_str(), "User@Example.com");
    }

    #[test]
    fn test_attempt_limit_bounds() {
        assert_eq!(AttemptLimit::default().get(), 3);
        assert!(AttemptLimit::new(1).is_some());
        assert!(AttemptLimit::new(10).is_some());
        assert!(AttemptLimit::new(0).is_none());
        assert!(AttemptLimit::new(11).is_none());
    }

    #[test]
    fn test_decision_wire_names() {
        assert_eq!(serde_json::to_string(&Decision::Issue).unwrap(), r#""issue""#);
        assert_eq!(serde_json::to_string(&Decision::Grant).unwrap(), r#""grant""#);
        assert_eq!(serde_json::to_string(&Decision::Fail).unwrap(), r#""fail""#);
        assert!(!Decision::Issue.is_terminal());
        assert!(Decision::Fail.is_terminal());
    }
}
