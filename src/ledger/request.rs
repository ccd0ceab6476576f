//! Prediction Requests
//!
//! Request records and their lifecycle state machine. `Pending` is the only
//! non-terminal state; `Fulfilled`, `Cancelled`, and `Expired` are terminal
//! and mutually exclusive. Terminal entries are never deleted — they stay in
//! the ledger as queryable history.

use serde::{Serialize, Deserialize};

use crate::core::account::AccountId;
use crate::core::time::Timestamp;
use crate::core::token::Amount;

/// Lifecycle state of a prediction request.
///
/// Strictly one-directional: once a request leaves `Pending` it never
/// transitions again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Awaiting fulfillment, cancellation, or expiry.
    Pending,
    /// A fulfiller submitted an accepted result and claimed the escrow.
    Fulfilled,
    /// The requester withdrew the commission; deposit refunded.
    Cancelled,
    /// The deadline passed with no fulfillment; deposit refunded.
    Expired,
}

impl RequestStatus {
    /// True for every state except `Pending`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// How a request was fulfilled.
///
/// The zk path is a variant, not a flag: a `Verified` outcome can only be
/// constructed by the fulfillment gate after the pairing and consistency
/// checks passed, so "verified" and "price" can never disagree in storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FulfillmentOutcome {
    /// Result accepted without a proof (request did not require one).
    Unverified {
        /// Accepted fixed-point price.
        predicted_price: u64,
    },
    /// Result accepted with a passing Groth16 proof.
    Verified {
        /// Accepted fixed-point price, consistent with the proof's first
        /// public signal.
        predicted_price: u64,
    },
}

impl FulfillmentOutcome {
    /// The accepted price, whichever path produced it.
    #[inline]
    pub fn predicted_price(self) -> u64 {
        match self {
            Self::Unverified { predicted_price } | Self::Verified { predicted_price } => {
                predicted_price
            }
        }
    }

    /// `Some(true)` for a proof-backed outcome, `None` when no proof was
    /// involved.
    #[inline]
    pub fn zk_verified(self) -> Option<bool> {
        match self {
            Self::Verified { .. } => Some(true),
            Self::Unverified { .. } => None,
        }
    }
}

/// A commissioned price prediction and its settlement state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Monotonic id, assigned once, never reused.
    pub id: u64,
    /// Account that escrowed the deposit.
    pub requester: AccountId,
    /// Asset symbol the prediction is about (e.g. "NEAR").
    pub asset: String,
    /// Horizon of the prediction (e.g. "24h").
    pub timeframe: String,
    /// Whether fulfillment must carry a passing proof.
    pub zk_required: bool,
    /// Escrowed deposit in smallest units.
    pub deposit: Amount,
    /// Current lifecycle state.
    pub status: RequestStatus,
    /// Host time at creation.
    pub created_at: Timestamp,
    /// Deadline after which only `expire` applies. Always > `created_at`.
    pub expires_at: Timestamp,
    /// Set exactly once, by the fulfillment gate, when status becomes
    /// `Fulfilled`.
    pub outcome: Option<FulfillmentOutcome>,
}

impl PredictionRequest {
    /// The accepted price, if fulfilled.
    pub fn predicted_price(&self) -> Option<u64> {
        self.outcome.map(FulfillmentOutcome::predicted_price)
    }

    /// Whether the accepted result was proof-backed. `None` means either
    /// "not fulfilled yet" or "fulfilled without a proof".
    pub fn zk_verified(&self) -> Option<bool> {
        self.outcome.and_then(FulfillmentOutcome::zk_verified)
    }

    /// True once `now` has reached the deadline.
    #[inline]
    pub fn is_stale(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Fulfilled.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
        assert!(RequestStatus::Expired.is_terminal());
    }

    #[test]
    fn test_outcome_accessors() {
        let plain = FulfillmentOutcome::Unverified { predicted_price: 542_000 };
        assert_eq!(plain.predicted_price(), 542_000);
        assert_eq!(plain.zk_verified(), None);

        let proven = FulfillmentOutcome::Verified { predicted_price: 542_000 };
        assert_eq!(proven.zk_verified(), Some(true));
    }
}
