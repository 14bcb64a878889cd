//! Identity handle type
//!
//! An `Identity` is the opaque username string a social platform uses for an
//! account. Two identities are equal exactly when their string values are
//! byte-equal (case-sensitive).

use serde::{Deserialize, Serialize};

/// Opaque, case-sensitive handle identifying a platform account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap a username string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the handle and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
