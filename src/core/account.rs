//! Account Identifiers
//!
//! Opaque account references used for requesters, fulfillers, and fee
//! recipients. The host's identity layer decides what a valid account name
//! looks like; this crate only needs stable equality and ordering.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Opaque account identifier.
///
/// Implements Ord so it can key BTreeMaps (whitelists, bank balances)
/// with deterministic iteration order.
///
/// # Example
///
/// ```
/// use prediction_escrow::core::account::AccountId;
///
/// let alice = AccountId::new("alice.near");
/// assert_eq!(alice.as_str(), "alice.near");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the underlying name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = AccountId::new("alice");
        let b = AccountId::new("bob");
        assert!(a < b);
    }

    #[test]
    fn test_serde_transparent() {
        let id = AccountId::new("solver.near");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"solver.near\"");
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
