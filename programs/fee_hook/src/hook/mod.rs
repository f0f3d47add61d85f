//! # Hook Engine Module
//!
//! The dynamic fee and risk-control engine consulted by the AMM around every
//! trade on a registered pool. It combines independently-configurable fee
//! components, a bootstrap decay curve, a bounded price-history ring for
//! volatility estimation, and a per-trade price-impact guard. The engine
//! only reads reserves; it never moves funds.

pub mod dispatcher;
pub mod fee;
pub mod history;
pub mod impact;

pub use dispatcher::*;
pub use fee::*;
pub use history::*;
pub use impact::*;

use anchor_lang::prelude::*;

use crate::state::config::BPS_DENOM;

/// Out-of-range fee value meaning "do not trade". A data signal, not an
/// error: halted and closed markets report it instead of reverting.
pub const FEE_SENTINEL_BPS: u16 = 10_001;

/// The 50/50 midpoint probability.
pub const NEUTRAL_PROBABILITY_BPS: u16 = 5_000;

/// Minimum fresh snapshots before the volatility estimate is meaningful.
pub const MIN_VOLATILITY_SAMPLES: usize = 3;

/// Engine errors. All failures are synchronous and atomic; no partial state
/// survives a failed instruction.
#[error_code]
pub enum HookError {
    #[msg("Market does not match the registered pool")]
    InvalidMarket,
    #[msg("Market is past its close time or already resolved")]
    MarketClosed,
    #[msg("Market is already registered with a pool")]
    AlreadyRegistered,
    #[msg("Caller is not allowed to perform this action")]
    Unauthorized,
    #[msg("Pool is not registered")]
    InvalidPoolId,
    #[msg("Fee configuration is invalid")]
    InvalidConfig,
    #[msg("Bootstrap start adjustment is not allowed")]
    InvalidBootstrapStart,
    #[msg("Trade moved the price beyond the configured impact limit")]
    PriceImpactTooHigh,
    #[msg("Pre-trade reserves were not captured for this pool")]
    MissingPreTradeSnapshot,
    #[msg("Arithmetic overflow")]
    Overflow,
}

/// Market-implied probability of the YES outcome, in basis points.
///
/// Equals the price of the YES token: `no / (yes + no)`. An empty pool is
/// read as 50/50 rather than dividing by zero.
pub fn probability_bps(reserve0: u64, reserve1: u64, yes_is_token0: bool) -> u16 {
    let (yes, no) = if yes_is_token0 {
        (reserve0, reserve1)
    } else {
        (reserve1, reserve0)
    };
    let total = yes as u128 + no as u128;
    if total == 0 {
        return NEUTRAL_PROBABILITY_BPS;
    }
    ((no as u128 * BPS_DENOM as u128) / total) as u16
}

/// Absolute probability shift between two reserve observations.
pub fn probability_shift_bps(
    before: (u64, u64),
    after: (u64, u64),
    yes_is_token0: bool,
) -> u16 {
    let p_before = probability_bps(before.0, before.1, yes_is_token0);
    let p_after = probability_bps(after.0, after.1, yes_is_token0);
    p_before.abs_diff(p_after)
}
