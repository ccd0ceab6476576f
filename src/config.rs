//! Market Configuration
//!
//! Deployment-time knobs. Everything here is fixed at construction; nothing
//! reads the environment after startup.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::core::account::AccountId;
use crate::core::time::DAY_MS;
use crate::core::token::{Amount, TENTH_TOKEN};

/// Who may call `fulfill`.
///
/// The source product never settled on "single trusted solver" versus
/// "whitelist", so the policy is configuration, not code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FulfillerPolicy {
    /// Any caller may fulfill (permissive deployments).
    #[default]
    Open,
    /// Only listed accounts may fulfill.
    Whitelist(BTreeSet<AccountId>),
}

impl FulfillerPolicy {
    /// Build a whitelist from account names.
    pub fn whitelist<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Whitelist(accounts.into_iter().map(|a| AccountId::new(a)).collect())
    }

    /// Whether `caller` may fulfill requests.
    pub fn allows(&self, caller: &AccountId) -> bool {
        match self {
            Self::Open => true,
            Self::Whitelist(accounts) => accounts.contains(caller),
        }
    }
}

/// Deployment-time market parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Account allowed to install the verification key.
    pub owner: AccountId,
    /// Smallest accepted deposit, in smallest token units.
    pub min_deposit: Amount,
    /// How long a request stays fulfillable, in milliseconds.
    pub request_ttl_ms: u64,
    /// Protocol fee in basis points, taken from each payout.
    pub fee_bps: u16,
    /// Where the fee goes; `None` disables the fee entirely.
    pub fee_recipient: Option<AccountId>,
    /// Fulfillment authorization policy.
    pub fulfiller_policy: FulfillerPolicy,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            owner: AccountId::new("owner"),
            min_deposit: TENTH_TOKEN,
            request_ttl_ms: DAY_MS,
            fee_bps: 0,
            fee_recipient: None,
            fulfiller_policy: FulfillerPolicy::Open,
        }
    }
}

impl MarketConfig {
    /// Create config from environment variables.
    ///
    /// - `MARKET_OWNER`: owner account
    /// - `MARKET_MIN_DEPOSIT`: minimum deposit in smallest units
    /// - `MARKET_REQUEST_TTL_MS`: request time-to-live
    /// - `MARKET_FEE_BPS` / `MARKET_FEE_RECIPIENT`: payout fee split
    /// - `MARKET_FULFILLERS`: comma-separated whitelist; unset means open
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            owner: std::env::var("MARKET_OWNER")
                .map(AccountId::new)
                .unwrap_or(defaults.owner),
            min_deposit: std::env::var("MARKET_MIN_DEPOSIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_deposit),
            request_ttl_ms: std::env::var("MARKET_REQUEST_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_ttl_ms),
            fee_bps: std::env::var("MARKET_FEE_BPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fee_bps),
            fee_recipient: std::env::var("MARKET_FEE_RECIPIENT").ok().map(AccountId::new),
            fulfiller_policy: match std::env::var("MARKET_FULFILLERS") {
                Ok(list) => FulfillerPolicy::whitelist(
                    list.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from),
                ),
                Err(_) => FulfillerPolicy::Open,
            },
        }
    }
}
