//! # Prediction Escrow
//!
//! Escrowed price-prediction commissions settled behind a Groth16
//! verification gate. A requester deposits funds to commission a prediction;
//! an authorized fulfiller claims the escrow by submitting a result,
//! optionally proving in zero knowledge that the result was computed from
//! hidden model parameters.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PREDICTION ESCROW                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Accounts, amounts, timestamps            │
//! │  ├── account.rs   - Ordered AccountId newtype                │
//! │  ├── token.rs     - u128 smallest-unit amounts, fee split    │
//! │  └── time.rs      - Host-supplied millisecond timestamps     │
//! │                                                              │
//! │  ledger/          - Authoritative request store              │
//! │  ├── request.rs   - Status state machine, outcomes           │
//! │  ├── store.rs     - BTreeMap arena, monotonic ids, settle    │
//! │  └── events.rs    - Per-transition event log                 │
//! │                                                              │
//! │  escrow/          - One-shot deposit settlement              │
//! │  proof/           - Groth16 gate (BN254)                     │
//! │  ├── wire.rs      - snarkjs JSON, dual decimal/hex integers  │
//! │  └── verifier.rs  - Pairing check, price consistency         │
//! │                                                              │
//! │  market/          - The fulfillment gate facade              │
//! │  ├── mod.rs       - create/fulfill/cancel/expire             │
//! │  └── sweeper.rs   - Permissionless batch expiry              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settlement Guarantee
//!
//! The ledger is a single serialized store: the host imposes a total order
//! on calls, `&mut self` encodes it, and every operation either fully
//! applies or returns a typed error with zero state change. For every
//! request id, at most one of payout / refund ever happens — enforced by
//! the one-directional status machine, backstopped by the escrow manager
//! consuming its hold entry on settlement.
//!
//! Proof verification is pure and deterministic, and costs a constant
//! number of pairings no matter how large the proven computation was.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod config;
pub mod ledger;
pub mod escrow;
pub mod proof;
pub mod market;

// Re-export commonly used types
pub use crate::core::account::AccountId;
pub use crate::core::token::{Amount, ONE_TOKEN, TENTH_TOKEN};
pub use crate::core::time::Timestamp;
pub use crate::config::{MarketConfig, FulfillerPolicy};
pub use crate::error::{MarketError, ValidationError, AuthorizationError, StateError};
pub use crate::ledger::{PredictionRequest, RequestStatus, FulfillmentOutcome, LedgerEvent};
pub use crate::escrow::{Bank, InMemoryBank};
pub use crate::proof::{ProofArtifact, ProofVerifier, ParseError, ProofError, PRICE_SCALE};
pub use crate::market::{PredictionMarket, CallContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
