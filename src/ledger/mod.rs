//! Request Ledger Module
//!
//! The authoritative record of prediction requests.
//!
//! - `request`: request records, status state machine, fulfillment outcomes
//! - `store`: BTreeMap arena with monotonic ids and the settle guard
//! - `events`: per-transition event log

pub mod request;
pub mod store;
pub mod events;

// Re-export key types
pub use request::{PredictionRequest, RequestStatus, FulfillmentOutcome};
pub use store::{RequestLedger, Resolution};
pub use events::LedgerEvent;
