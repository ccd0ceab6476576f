//! Token Amounts
//!
//! Integer-only value arithmetic. Amounts are carried in the token's
//! smallest unit (24 decimals, NEAR-style) so no floating point ever
//! touches settlement logic.

/// Token amount in smallest units (10^-24 of a whole token).
pub type Amount = u128;

/// Decimal places of the settlement token.
pub const TOKEN_DECIMALS: u32 = 24;

/// 1.0 whole token in smallest units.
pub const ONE_TOKEN: Amount = 1_000_000_000_000_000_000_000_000;

/// 0.1 token: the default minimum deposit.
pub const TENTH_TOKEN: Amount = ONE_TOKEN / 10;

/// Basis-point denominator for fee splits (10_000 = 100%).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Split an amount into (fee, remainder) by basis points.
///
/// Integer division truncates toward the fulfiller: the fee is rounded
/// down and the remainder absorbs the dust.
///
/// Computed as quotient and remainder parts separately so `amount * bps`
/// never has to fit in a u128; exact for the full `Amount` range.
#[inline]
pub fn split_fee(amount: Amount, fee_bps: u16) -> (Amount, Amount) {
    let bps = fee_bps as u128;
    let fee = amount / BPS_DENOMINATOR * bps + amount % BPS_DENOMINATOR * bps / BPS_DENOMINATOR;
    (fee, amount - fee)
}

/// Render an amount as a whole-token decimal string for logs.
///
/// Trailing fractional zeros are trimmed; `1_500_000...` units of a
/// 24-decimal token renders as "1.5".
pub fn format_amount(amount: Amount) -> String {
    let whole = amount / ONE_TOKEN;
    let frac = amount % ONE_TOKEN;
    if frac == 0 {
        return format!("{}", whole);
    }
    let frac_str = format!("{:024}", frac);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}
