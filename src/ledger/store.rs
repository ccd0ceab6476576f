//! Request Ledger
//!
//! The authoritative store of prediction requests. A BTreeMap arena keyed by
//! monotonic id: insertion order and id order coincide, which gives
//! fulfillers a stable oldest-first queue. Entries are inserted once, settled
//! at most once, and never deleted.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::core::account::AccountId;
use crate::core::time::Timestamp;
use crate::core::token::Amount;
use crate::error::StateError;
use crate::ledger::request::{FulfillmentOutcome, PredictionRequest, RequestStatus};

/// Terminal transition applied through [`RequestLedger::settle`].
#[derive(Clone, Copy, Debug)]
pub enum Resolution {
    /// Pending → Fulfilled, recording the accepted outcome.
    Fulfilled(FulfillmentOutcome),
    /// Pending → Cancelled.
    Cancelled,
    /// Pending → Expired.
    Expired,
}

/// Authoritative request store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RequestLedger {
    requests: BTreeMap<u64, PredictionRequest>,
    next_id: u64,
}

impl RequestLedger {
    /// Create an empty ledger. Ids start at 1.
    pub fn new() -> Self {
        Self {
            requests: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Allocate the next id and store a `Pending` entry.
    ///
    /// Parameter validation is the gate's job; the ledger only enforces its
    /// own structural invariants (`expires_at > created_at` via debug assert,
    /// ids never reused by construction).
    pub(crate) fn insert(
        &mut self,
        requester: AccountId,
        asset: String,
        timeframe: String,
        zk_required: bool,
        deposit: Amount,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> u64 {
        debug_assert!(expires_at > created_at);
        let id = self.next_id;
        self.next_id += 1;
        self.requests.insert(id, PredictionRequest {
            id,
            requester,
            asset,
            timeframe,
            zk_required,
            deposit,
            status: RequestStatus::Pending,
            created_at,
            expires_at,
            outcome: None,
        });
        id
    }

    /// Look up a request by id.
    pub fn get(&self, id: u64) -> Option<&PredictionRequest> {
        self.requests.get(&id)
    }

    /// Pending requests in id (= insertion) order, oldest first, at most
    /// `limit` entries.
    pub fn list_pending(&self, limit: u32) -> Vec<&PredictionRequest> {
        self.requests
            .values()
            .filter(|r| r.status == RequestStatus::Pending)
            .take(limit as usize)
            .collect()
    }

    /// Ids of pending requests whose deadline has passed, oldest first.
    pub fn stale_pending_ids(&self, now: Timestamp, limit: u32) -> Vec<u64> {
        self.requests
            .values()
            .filter(|r| r.status == RequestStatus::Pending && r.is_stale(now))
            .map(|r| r.id)
            .take(limit as usize)
            .collect()
    }

    /// Total number of requests ever created.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// True when no request has ever been created.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Apply a terminal transition to a `Pending` request.
    ///
    /// The only mutation path out of `Pending`: callers that have already
    /// verified the status still go through the same guard, so a double
    /// settlement is structurally impossible.
    pub(crate) fn settle(
        &mut self,
        id: u64,
        resolution: Resolution,
    ) -> Result<&PredictionRequest, StateError> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or(StateError::UnknownRequest { id })?;
        if request.status != RequestStatus::Pending {
            return Err(StateError::NotPending {
                id,
                status: request.status,
            });
        }
        match resolution {
            Resolution::Fulfilled(outcome) => {
                request.status = RequestStatus::Fulfilled;
                request.outcome = Some(outcome);
            }
            Resolution::Cancelled => request.status = RequestStatus::Cancelled,
            Resolution::Expired => request.status = RequestStatus::Expired,
        }
        Ok(&*request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(ledger: &mut RequestLedger, n: usize) -> Vec<u64> {
        (0..n)
            .map(|i| {
                ledger.insert(
                    AccountId::new("alice.near"),
                    format!("ASSET{}", i),
                    "24h".to_string(),
                    false,
                    100,
                    1_000,
                    2_000,
                )
            })
            .collect()
    }

    #[test]
    fn test_ids_are_monotonic_from_one() {
        let mut ledger = RequestLedger::new();
        let ids = seed(&mut ledger, 3);
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_list_pending_is_insertion_ordered_and_bounded() {
        let mut ledger = RequestLedger::new();
        seed(&mut ledger, 5);
        ledger.settle(2, Resolution::Cancelled).unwrap();

        let pending = ledger.list_pending(3);
        let ids: Vec<u64> = pending.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_settle_is_one_directional() {
        let mut ledger = RequestLedger::new();
        seed(&mut ledger, 1);

        ledger
            .settle(1, Resolution::Fulfilled(FulfillmentOutcome::Unverified {
                predicted_price: 42,
            }))
            .unwrap();

        // Every further transition attempt fails, whatever it asks for.
        let err = ledger.settle(1, Resolution::Expired).unwrap_err();
        assert_eq!(err, StateError::NotPending {
            id: 1,
            status: RequestStatus::Fulfilled,
        });
    }

    #[test]
    fn test_settle_unknown_id() {
        let mut ledger = RequestLedger::new();
        let err = ledger.settle(99, Resolution::Cancelled).unwrap_err();
        assert_eq!(err, StateError::UnknownRequest { id: 99 });
    }

    #[test]
    fn test_stale_pending_ids() {
        let mut ledger = RequestLedger::new();
        seed(&mut ledger, 3); // all expire at 2_000
        assert!(ledger.stale_pending_ids(1_999, 10).is_empty());
        assert_eq!(ledger.stale_pending_ids(2_000, 10), vec![1, 2, 3]);
        assert_eq!(ledger.stale_pending_ids(2_000, 2), vec![1, 2]);
    }
}
