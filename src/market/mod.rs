//! Prediction Market
//!
//! The single entry point for every state mutation: request creation,
//! fulfillment, cancellation, expiry, and verifier initialization. All
//! shared state (ledger, escrow, event log) lives behind this facade and is
//! touched only through its operations.
//!
//! ## Atomicity
//!
//! The host serializes calls; `&mut self` encodes that in the type system.
//! Every operation is check-then-commit: all fallible work (status guards,
//! authorization, proof parsing and verification) runs before the first
//! mutation, so an error always means zero observable state change. Two
//! competing `fulfill` calls resolve purely by call order — the second one
//! finds a non-`Pending` status and is rejected.

pub mod sweeper;

use tracing::{info, warn};

use crate::config::MarketConfig;
use crate::core::account::AccountId;
use crate::core::time::Timestamp;
use crate::core::token::{format_amount, Amount};
use crate::error::{AuthorizationError, MarketError, StateError, ValidationError};
use crate::escrow::{Bank, EscrowManager};
use crate::ledger::events::LedgerEvent;
use crate::ledger::request::{FulfillmentOutcome, PredictionRequest, RequestStatus};
use crate::ledger::store::{RequestLedger, Resolution};
use crate::proof::verifier::{check_consistency, ProofError, ProofVerifier, PRICE_SCALE};
use crate::proof::wire::parse_proof;

/// Longest accepted asset symbol, in bytes.
pub const MAX_ASSET_LEN: usize = 32;

/// Longest accepted timeframe string, in bytes.
pub const MAX_TIMEFRAME_LEN: usize = 16;

/// Host-supplied facts about one call.
///
/// The market never consults a clock or an identity layer itself; whatever
/// total order and timestamps the host imposes are taken at face value.
#[derive(Clone, Debug)]
pub struct CallContext {
    /// Account making the call.
    pub caller: AccountId,
    /// Value attached to the call, in smallest units.
    pub attached_deposit: Amount,
    /// Host time of the call, milliseconds.
    pub now: Timestamp,
}

impl CallContext {
    /// Context with no attached value.
    pub fn new(caller: impl Into<String>, now: Timestamp) -> Self {
        Self {
            caller: AccountId::new(caller),
            attached_deposit: 0,
            now,
        }
    }

    /// Attach a deposit.
    pub fn with_deposit(mut self, amount: Amount) -> Self {
        self.attached_deposit = amount;
        self
    }
}

/// The escrowed prediction market.
#[derive(Debug)]
pub struct PredictionMarket<B: Bank> {
    config: MarketConfig,
    ledger: RequestLedger,
    escrow: EscrowManager,
    verifier: Option<ProofVerifier>,
    bank: B,
    events: Vec<LedgerEvent>,
}

impl<B: Bank> PredictionMarket<B> {
    /// Create a market over the given value-transfer backend.
    pub fn new(config: MarketConfig, bank: B) -> Self {
        Self {
            config,
            ledger: RequestLedger::new(),
            escrow: EscrowManager::new(),
            verifier: None,
            bank,
            events: Vec::new(),
        }
    }

    /// Install the verification key. Owner-only, exactly once; after this
    /// the key is immutable for the market's lifetime (new key = new
    /// deployment).
    pub fn init_verifier(&mut self, ctx: &CallContext, vk_json: &str) -> Result<(), MarketError> {
        if ctx.caller != self.config.owner {
            return Err(AuthorizationError::NotOwner {
                caller: ctx.caller.clone(),
            }
            .into());
        }
        if self.verifier.is_some() {
            return Err(StateError::VerifierAlreadyInitialized.into());
        }
        let verifier = ProofVerifier::from_wire(vk_json)?;
        info!(signals = verifier.public_signal_count(), "verification key installed");
        self.verifier = Some(verifier);
        Ok(())
    }

    /// Whether a verification key has been installed.
    pub fn verifier_initialized(&self) -> bool {
        self.verifier.is_some()
    }

    /// Commission a prediction, escrowing the attached deposit.
    pub fn create_request(
        &mut self,
        ctx: &CallContext,
        asset: &str,
        timeframe: &str,
        zk_required: bool,
    ) -> Result<u64, MarketError> {
        let asset = validated_field(asset, "asset", MAX_ASSET_LEN)?;
        let timeframe = validated_field(timeframe, "timeframe", MAX_TIMEFRAME_LEN)?;
        let deposit = ctx.attached_deposit;
        if deposit < self.config.min_deposit {
            return Err(ValidationError::DepositTooLow {
                got: deposit,
                min: self.config.min_deposit,
            }
            .into());
        }

        // Saturate rather than wrap: a host clock near u64::MAX must not
        // produce an expiry in the past.
        let expires_at = ctx.now.saturating_add(self.config.request_ttl_ms);
        let id = self.ledger.insert(
            ctx.caller.clone(),
            asset.clone(),
            timeframe.clone(),
            zk_required,
            deposit,
            ctx.now,
            expires_at,
        );
        self.escrow.hold(id, ctx.caller.clone(), deposit);

        info!(
            id,
            requester = %ctx.caller,
            asset = %asset,
            timeframe = %timeframe,
            zk_required,
            deposit = %format_amount(deposit),
            "prediction requested"
        );
        self.events.push(LedgerEvent::PredictionRequested {
            id,
            requester: ctx.caller.clone(),
            asset,
            timeframe,
            deposit,
        });
        Ok(id)
    }

    /// Look up one request, terminal or not.
    pub fn get_request(&self, id: u64) -> Option<&PredictionRequest> {
        self.ledger.get(id)
    }

    /// Pending requests oldest-first, at most `limit`.
    pub fn list_pending(&self, limit: u32) -> Vec<&PredictionRequest> {
        self.ledger.list_pending(limit)
    }

    /// Submit a result and claim the escrow.
    ///
    /// Gate order: lifecycle state, then caller authorization, then the
    /// proof path. Any failure leaves the request `Pending` and the escrow
    /// untouched — a rejected proof is retryable, not fatal.
    pub fn fulfill(
        &mut self,
        ctx: &CallContext,
        id: u64,
        predicted_price: u64,
        proof_json: Option<&str>,
    ) -> Result<(), MarketError> {
        let request = self
            .ledger
            .get(id)
            .ok_or(StateError::UnknownRequest { id })?;
        if request.status != RequestStatus::Pending {
            return Err(StateError::NotPending {
                id,
                status: request.status,
            }
            .into());
        }
        if request.is_stale(ctx.now) {
            // stale requests are expire-only; never silently fulfilled
            return Err(StateError::RequestExpired {
                id,
                expires_at: request.expires_at,
                now: ctx.now,
            }
            .into());
        }
        if !self.config.fulfiller_policy.allows(&ctx.caller) {
            return Err(AuthorizationError::FulfillerNotAllowed {
                caller: ctx.caller.clone(),
            }
            .into());
        }

        let outcome = match (request.zk_required, proof_json) {
            (true, None) => {
                warn!(id, "fulfillment rejected: proof required but missing");
                return Err(ProofError::Missing.into());
            }
            (false, None) => FulfillmentOutcome::Unverified { predicted_price },
            // A proof is checked whenever supplied, required or not; a
            // passing one upgrades the outcome, a failing one rejects.
            (_, Some(json)) => {
                let verifier = self
                    .verifier
                    .as_ref()
                    .ok_or(ProofError::VerifierNotInitialized)?;
                let artifact = parse_proof(json)?;
                if !check_consistency(&artifact, predicted_price, PRICE_SCALE) {
                    warn!(id, predicted_price, "fulfillment rejected: signal/price mismatch");
                    return Err(ProofError::ConsistencyMismatch { scale: PRICE_SCALE }.into());
                }
                if !verifier.verify(&artifact)? {
                    warn!(id, "fulfillment rejected: pairing check failed");
                    return Err(ProofError::PairingCheckFailed.into());
                }
                FulfillmentOutcome::Verified { predicted_price }
            }
        };

        // Commit. Nothing below can observe a Pending status again: payout
        // consumes the hold, settle leaves Pending, both under one &mut.
        self.escrow.payout(
            &mut self.bank,
            id,
            &ctx.caller,
            self.config.fee_bps,
            self.config.fee_recipient.as_ref(),
        )?;
        self.ledger.settle(id, Resolution::Fulfilled(outcome))?;

        info!(
            id,
            fulfiller = %ctx.caller,
            predicted_price,
            zk_verified = ?outcome.zk_verified(),
            "prediction fulfilled"
        );
        self.events.push(LedgerEvent::PredictionFulfilled {
            id,
            predicted_price,
            zk_verified: outcome.zk_verified(),
        });
        Ok(())
    }

    /// Withdraw a commission. Requester-only; refunds the deposit.
    pub fn cancel_request(&mut self, ctx: &CallContext, id: u64) -> Result<(), MarketError> {
        let request = self
            .ledger
            .get(id)
            .ok_or(StateError::UnknownRequest { id })?;
        if request.status != RequestStatus::Pending {
            return Err(StateError::NotPending {
                id,
                status: request.status,
            }
            .into());
        }
        if request.requester != ctx.caller {
            return Err(AuthorizationError::NotRequester {
                id,
                caller: ctx.caller.clone(),
            }
            .into());
        }

        self.escrow.refund(&mut self.bank, id)?;
        self.ledger.settle(id, Resolution::Cancelled)?;

        info!(id, requester = %ctx.caller, "prediction cancelled");
        self.events.push(LedgerEvent::PredictionCancelled { id });
        Ok(())
    }

    /// Expire an abandoned request. Permissionless; refunds the requester.
    ///
    /// Idempotent in effect: the first call settles, every later call finds
    /// a non-`Pending` status and fails cleanly.
    pub fn expire(&mut self, ctx: &CallContext, id: u64) -> Result<(), MarketError> {
        let request = self
            .ledger
            .get(id)
            .ok_or(StateError::UnknownRequest { id })?;
        if request.status != RequestStatus::Pending {
            return Err(StateError::NotPending {
                id,
                status: request.status,
            }
            .into());
        }
        if !request.is_stale(ctx.now) {
            return Err(StateError::NotYetExpired {
                id,
                expires_at: request.expires_at,
                now: ctx.now,
            }
            .into());
        }

        self.escrow.refund(&mut self.bank, id)?;
        self.ledger.settle(id, Resolution::Expired)?;

        info!(id, sweeper = %ctx.caller, "prediction expired");
        self.events.push(LedgerEvent::PredictionExpired { id });
        Ok(())
    }

    /// Drain the event log in emission order.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// The value-transfer backend (for inspection in tests and demos).
    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// Total deposits currently held in escrow.
    pub fn total_escrowed(&self) -> Amount {
        self.escrow.total_held()
    }

    /// The active configuration.
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Ids of pending requests whose deadline has passed.
    pub(crate) fn stale_pending_ids(&self, now: Timestamp, limit: u32) -> Vec<u64> {
        self.ledger.stale_pending_ids(now, limit)
    }
}

fn validated_field(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    if trimmed.len() > max {
        return Err(ValidationError::FieldTooLong { field, max });
    }
    Ok(trimmed.to_string())
}
