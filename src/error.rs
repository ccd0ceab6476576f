//! Error Taxonomy
//!
//! Every public operation either fully applies its effects or returns one of
//! these errors with zero observable state change. The five categories match
//! the failure surface of the call gate: bad parameters, bad caller, bad
//! lifecycle state, bad proof encoding, bad proof.

use thiserror::Error;

use crate::core::account::AccountId;
use crate::core::time::Timestamp;
use crate::core::token::Amount;
use crate::ledger::request::RequestStatus;
use crate::proof::verifier::ProofError;
use crate::proof::wire::ParseError;

/// Top-level error for every market operation.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Parameters were rejected before any state was touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Caller is not allowed to perform this operation.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// Operation is invalid for the request's current lifecycle state.
    #[error(transparent)]
    State(#[from] StateError),

    /// Proof artifact could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Proof artifact decoded but failed verification.
    #[error(transparent)]
    Proof(#[from] ProofError),
}

/// Bad call parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Attached deposit is below the configured minimum.
    #[error("deposit {got} is below the minimum {min}")]
    DepositTooLow {
        /// Attached deposit in smallest units.
        got: Amount,
        /// Configured minimum in smallest units.
        min: Amount,
    },

    /// A required string parameter is empty or whitespace.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Offending parameter name.
        field: &'static str,
    },

    /// A string parameter exceeds its length cap.
    #[error("{field} exceeds {max} bytes")]
    FieldTooLong {
        /// Offending parameter name.
        field: &'static str,
        /// Maximum accepted length in bytes.
        max: usize,
    },
}

/// Caller is not permitted to do what it asked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// Only the original requester may cancel.
    #[error("account {caller} is not the requester of request {id}")]
    NotRequester {
        /// Request being cancelled.
        id: u64,
        /// Account that attempted the cancel.
        caller: AccountId,
    },

    /// Caller is not on the fulfiller whitelist.
    #[error("account {caller} is not an authorized fulfiller")]
    FulfillerNotAllowed {
        /// Account that attempted the fulfillment.
        caller: AccountId,
    },

    /// Operation is reserved for the market owner.
    #[error("account {caller} is not the market owner")]
    NotOwner {
        /// Account that attempted the call.
        caller: AccountId,
    },
}

/// Operation is invalid for the request's current state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// No request with this id exists.
    #[error("request {id} does not exist")]
    UnknownRequest {
        /// Requested id.
        id: u64,
    },

    /// Request has already left `Pending`.
    #[error("request {id} is {status:?}, not Pending")]
    NotPending {
        /// Request id.
        id: u64,
        /// Its current terminal status.
        status: RequestStatus,
    },

    /// Deadline has passed; the request can only be expired now.
    #[error("request {id} expired at {expires_at} (now {now})")]
    RequestExpired {
        /// Request id.
        id: u64,
        /// Expiry deadline.
        expires_at: Timestamp,
        /// Host time of the rejected call.
        now: Timestamp,
    },

    /// Deadline has not passed yet; expire is premature.
    #[error("request {id} does not expire until {expires_at} (now {now})")]
    NotYetExpired {
        /// Request id.
        id: u64,
        /// Expiry deadline.
        expires_at: Timestamp,
        /// Host time of the rejected call.
        now: Timestamp,
    },

    /// Escrow for this id was already paid out or refunded.
    ///
    /// Unreachable through the public surface (the status guard runs first);
    /// kept as a hard stop on the at-most-one-settlement invariant.
    #[error("escrow for request {id} was already settled")]
    EscrowAlreadySettled {
        /// Request id.
        id: u64,
    },

    /// The verification key may only be installed once.
    #[error("verifier is already initialized")]
    VerifierAlreadyInitialized,
}
