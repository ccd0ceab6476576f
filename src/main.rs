//! Prediction Escrow Demo
//!
//! Walks the full request lifecycle against an in-memory bank: commission,
//! fulfillment, cancellation, and an expiry sweep.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use prediction_escrow::{
    market::sweeper::sweep_expired, AccountId, CallContext, InMemoryBank, MarketConfig,
    PredictionMarket, FulfillerPolicy, TENTH_TOKEN, VERSION,
};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Prediction Escrow v{}", VERSION);

    let config = MarketConfig {
        fulfiller_policy: FulfillerPolicy::whitelist(["solver.near"]),
        ..MarketConfig::from_env()
    };
    info!(min_deposit = config.min_deposit, ttl_ms = config.request_ttl_ms, "market configured");

    let mut market = PredictionMarket::new(config, InMemoryBank::new());
    let t0: u64 = 1_700_000_000_000;

    // Three commissions from the same requester
    let alice = |now: u64| CallContext::new("alice.near", now).with_deposit(TENTH_TOKEN);
    let fulfilled = market.create_request(&alice(t0), "NEAR", "24h", false)?;
    let cancelled = market.create_request(&alice(t0), "BTC", "1h", false)?;
    let abandoned = market.create_request(&alice(t0), "ETH", "7d", false)?;

    // The whitelisted solver submits a result and claims the escrow
    let solver = CallContext::new("solver.near", t0 + 60_000);
    market.fulfill(&solver, fulfilled, 542_000, None)?;

    // The requester changes her mind about the second one
    market.cancel_request(&CallContext::new("alice.near", t0 + 120_000), cancelled)?;

    // The third goes stale; anyone may sweep it
    let keeper = CallContext::new("keeper.near", t0 + market.config().request_ttl_ms);
    let swept = sweep_expired(&mut market, &keeper, 100);
    info!(swept, abandoned, "sweep finished");

    for event in market.take_events() {
        info!(?event, "ledger event");
    }

    let bank = market.bank();
    info!(
        solver = bank.balance(&AccountId::new("solver.near")),
        requester = bank.balance(&AccountId::new("alice.near")),
        escrowed = market.total_escrowed(),
        "final balances"
    );
    Ok(())
}
