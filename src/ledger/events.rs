//! Ledger Events
//!
//! One event per state transition, appended to an in-order log that the host
//! drains after each call. Events are the external record of what happened;
//! the ledger itself stays the source of truth.

use serde::{Serialize, Deserialize};

use crate::core::account::AccountId;
use crate::core::token::Amount;

/// Emitted once per successful state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A new request entered the ledger with its deposit escrowed.
    PredictionRequested {
        /// New request id.
        id: u64,
        /// Account that escrowed the deposit.
        requester: AccountId,
        /// Asset symbol.
        asset: String,
        /// Prediction horizon.
        timeframe: String,
        /// Escrowed amount in smallest units.
        deposit: Amount,
    },

    /// A fulfiller's result was accepted and the escrow paid out.
    PredictionFulfilled {
        /// Settled request id.
        id: u64,
        /// Accepted fixed-point price.
        predicted_price: u64,
        /// `Some(true)` when a proof backed the result, `None` when the
        /// request did not involve one.
        zk_verified: Option<bool>,
    },

    /// The requester withdrew the commission.
    PredictionCancelled {
        /// Cancelled request id.
        id: u64,
    },

    /// The deadline passed and the deposit was refunded.
    PredictionExpired {
        /// Expired request id.
        id: u64,
    },
}

impl LedgerEvent {
    /// Id of the request this event concerns.
    pub fn request_id(&self) -> u64 {
        match self {
            Self::PredictionRequested { id, .. }
            | Self::PredictionFulfilled { id, .. }
            | Self::PredictionCancelled { id }
            | Self::PredictionExpired { id } => *id,
        }
    }
}
