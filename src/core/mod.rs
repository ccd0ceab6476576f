//! Core primitives.
//!
//! Accounts, amounts, and timestamps shared by every other module.
//! Integer-only and host-clock-free so the settlement state machine stays
//! deterministic and replayable.

pub mod account;
pub mod token;
pub mod time;

// Re-export core types
pub use account::AccountId;
pub use token::{Amount, ONE_TOKEN, TENTH_TOKEN, format_amount, split_fee};
pub use time::Timestamp;
