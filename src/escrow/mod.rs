//! Escrow Manager
//!
//! Holds the deposit for every pending request and settles it exactly once:
//! either a payout to the fulfiller (optionally minus a protocol fee) or a
//! refund to the requester. The manager does not re-check ledger status —
//! the fulfillment gate transitions status and calls in under the same
//! serialized mutation, which is what keeps the at-most-one bound airtight.
//! Removing the hold entry before crediting makes a second settlement fail
//! structurally even if that guarantee were ever broken.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::account::AccountId;
use crate::core::token::{split_fee, Amount};
use crate::error::StateError;

/// Opaque value-transfer capability.
///
/// The escrow manager already guards how much can move and when; the bank
/// only needs to credit an account, so the operation is infallible. Real
/// deployments back this with the host chain's native transfer; tests and
/// the demo use [`InMemoryBank`].
pub trait Bank {
    /// Credit `amount` smallest units to `account`.
    fn credit(&mut self, account: &AccountId, amount: Amount);
}

/// BTreeMap-backed bank for tests and the demo binary.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InMemoryBank {
    balances: BTreeMap<AccountId, Amount>,
}

impl InMemoryBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance of an account (0 if never credited).
    pub fn balance(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Sum of all balances, for conservation checks.
    pub fn total(&self) -> Amount {
        self.balances.values().sum()
    }
}

impl Bank for InMemoryBank {
    fn credit(&mut self, account: &AccountId, amount: Amount) {
        *self.balances.entry(account.clone()).or_insert(0) += amount;
    }
}

/// A deposit held for one pending request.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct EscrowHold {
    requester: AccountId,
    amount: Amount,
}

/// Tracks held deposits keyed by request id.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EscrowManager {
    held: BTreeMap<u64, EscrowHold>,
}

impl EscrowManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount currently held for a request, if unsettled.
    pub fn held(&self, id: u64) -> Option<Amount> {
        self.held.get(&id).map(|h| h.amount)
    }

    /// Sum of all held deposits.
    pub fn total_held(&self) -> Amount {
        self.held.values().map(|h| h.amount).sum()
    }

    /// Record a new hold. Called only from request creation, so `id` is
    /// fresh by construction.
    pub(crate) fn hold(&mut self, id: u64, requester: AccountId, amount: Amount) {
        debug_assert!(!self.held.contains_key(&id));
        self.held.insert(id, EscrowHold { requester, amount });
        debug!(id, amount, "escrow held");
    }

    /// Pay the held amount to `recipient`, splitting off `fee_bps` for the
    /// fee recipient when one is configured. Returns the amount the
    /// fulfiller received.
    pub(crate) fn payout(
        &mut self,
        bank: &mut dyn Bank,
        id: u64,
        recipient: &AccountId,
        fee_bps: u16,
        fee_recipient: Option<&AccountId>,
    ) -> Result<Amount, StateError> {
        let hold = self
            .held
            .remove(&id)
            .ok_or(StateError::EscrowAlreadySettled { id })?;
        let (fee, reward) = match (fee_recipient, fee_bps) {
            (Some(treasury), bps) if bps > 0 => {
                let (fee, reward) = split_fee(hold.amount, bps);
                if fee > 0 {
                    bank.credit(treasury, fee);
                }
                (fee, reward)
            }
            _ => (0, hold.amount),
        };
        bank.credit(recipient, reward);
        debug!(id, reward, fee, %recipient, "escrow paid out");
        Ok(reward)
    }

    /// Return the held amount to the original requester.
    pub(crate) fn refund(&mut self, bank: &mut dyn Bank, id: u64) -> Result<Amount, StateError> {
        let hold = self
            .held
            .remove(&id)
            .ok_or(StateError::EscrowAlreadySettled { id })?;
        bank.credit(&hold.requester, hold.amount);
        debug!(id, amount = hold.amount, requester = %hold.requester, "escrow refunded");
        Ok(hold.amount)
    }
}
