//! Expiry Sweeper
//!
//! Permissionless batch cleanup of abandoned requests. Anyone may run the
//! sweep; it is just `expire` applied to every pending request whose
//! deadline has passed, oldest first.

use tracing::info;

use crate::escrow::Bank;
use crate::market::{CallContext, PredictionMarket};

/// Expire up to `limit` stale pending requests.
///
/// Returns how many requests were transitioned. A request another call
/// settles between listing and expiry is skipped, not an error — the sweep
/// never fails part-way.
pub fn sweep_expired<B: Bank>(
    market: &mut PredictionMarket<B>,
    ctx: &CallContext,
    limit: u32,
) -> usize {
    let stale = market.stale_pending_ids(ctx.now, limit);
    let mut swept = 0;
    for id in stale {
        if market.expire(ctx, id).is_ok() {
            swept += 1;
        }
    }
    if swept > 0 {
        info!(swept, sweeper = %ctx.caller, "expiry sweep complete");
    }
    swept
}
