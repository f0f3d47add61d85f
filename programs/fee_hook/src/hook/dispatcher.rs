//! Hook Dispatcher
//!
//! The callback surface invoked around every pool operation. Trade-shaped
//! operations are gated on registration and routed through the fee engine
//! and the price-impact guard; liquidity operations pass through untouched
//! so liquidity can always be withdrawn, even from a halted pool.
//!
//! Reserves read for the fee calculation are captured into a per-call cache
//! and reused by the impact guard, which needs the pre-trade values after
//! the trade has already mutated the pool. The cache is an explicit context
//! object owned by the calling instruction: it is keyed to one pool, cleared
//! at the end of the callback pair, and dies with the call, so a second
//! trade in the same transaction (same pool or another) starts clean.

use anchor_lang::prelude::*;

use crate::hook::fee::{current_fee_bps, market_phase};
use crate::hook::history::{record_snapshot, volatility, VolatilityEstimate};
use crate::hook::impact::check_price_impact;
use crate::hook::{probability_bps, HookError, NEUTRAL_PROBABILITY_BPS};
use crate::state::config::FeeConfig;
use crate::state::hook::HookState;

/// Kind of pool operation being dispatched.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HookOp {
    Swap,
    AddLiquidity,
    RemoveLiquidity,
}

impl HookOp {
    /// Only trades go through the fee/impact path.
    pub fn is_trade(&self) -> bool {
        matches!(self, HookOp::Swap)
    }
}

/// Pre-trade reserve capture, scoped to one pool and one callback pair.
pub struct ReserveCache {
    pool: Pubkey,
    pre_trade: Option<(u64, u64)>,
}

impl ReserveCache {
    pub fn new(pool: Pubkey) -> Self {
        Self {
            pool,
            pre_trade: None,
        }
    }

    /// Store the pre-trade reserves. The first capture wins, so a reserve
    /// read shared between the fee path and the impact guard happens once.
    /// A capture against a different pool is refused outright.
    pub fn capture(&mut self, pool: &Pubkey, reserves: (u64, u64)) -> Result<()> {
        require_keys_eq!(self.pool, *pool, HookError::InvalidPoolId);
        if self.pre_trade.is_none() {
            self.pre_trade = Some(reserves);
        }
        Ok(())
    }

    /// The captured reserves, if they belong to this pool.
    pub fn pre_trade(&self, pool: &Pubkey) -> Option<(u64, u64)> {
        if self.pool != *pool {
            return None;
        }
        self.pre_trade
    }

    /// Remove and return the capture for this pool.
    pub fn take(&mut self, pool: &Pubkey) -> Option<(u64, u64)> {
        if self.pool != *pool {
            return None;
        }
        self.pre_trade.take()
    }

    pub fn clear(&mut self) {
        self.pre_trade = None;
    }
}

/// Pre-trade callback. Returns the fee in basis points, or the sentinel when
/// the pool is halted or closed ("do not trade" without reverting).
#[allow(clippy::too_many_arguments)]
pub fn before_trade(
    op: HookOp,
    hook: Option<&HookState>,
    resolved: bool,
    close_time: i64,
    cfg: &FeeConfig,
    pool_id: &Pubkey,
    reserves: (u64, u64),
    cache: &mut ReserveCache,
    now: i64,
) -> Result<u16> {
    if !op.is_trade() {
        return Ok(0);
    }

    let hook = match hook {
        Some(h) if h.active => h,
        _ => return err!(HookError::InvalidPoolId),
    };

    let needs_reserves_for_fee = cfg.skew_fee_enabled || cfg.asymmetric_fee_enabled;
    let needs_reserves_for_impact = cfg.impact_guard_enabled;
    if needs_reserves_for_fee || needs_reserves_for_impact {
        cache.capture(pool_id, reserves)?;
    }

    let probability = match cache.pre_trade(pool_id) {
        Some((r0, r1)) if needs_reserves_for_fee => probability_bps(r0, r1, hook.yes_is_token0),
        _ => NEUTRAL_PROBABILITY_BPS,
    };
    let vol = if cfg.volatility_fee_enabled {
        volatility(hook, cfg.volatility_window_secs, now)
    } else {
        VolatilityEstimate::default()
    };

    let phase = market_phase(
        now,
        hook.bootstrap_start,
        cfg.bootstrap_window_secs,
        close_time,
        cfg.close_window_secs,
        resolved,
    );
    let fee = current_fee_bps(cfg, phase, now, hook.bootstrap_start, probability, vol);

    // Nothing left to compare post-trade: drop the capture now instead of
    // letting it linger until the after callback.
    if !needs_reserves_for_impact {
        cache.clear();
    }

    Ok(fee)
}

/// Post-trade callback. Records a price snapshot (at most one per slot) and
/// enforces the price-impact bound against the cached pre-trade reserves.
/// The cache entry is discarded before returning in every path.
#[allow(clippy::too_many_arguments)]
pub fn after_trade(
    op: HookOp,
    hook: Option<&mut HookState>,
    cfg: &FeeConfig,
    pool_id: &Pubkey,
    current_reserves: (u64, u64),
    cache: &mut ReserveCache,
    now: i64,
    slot: u64,
) -> Result<()> {
    if !op.is_trade() {
        cache.clear();
        return Ok(());
    }

    let hook = match hook {
        Some(h) if h.active => h,
        _ => {
            cache.clear();
            return err!(HookError::InvalidPoolId);
        }
    };

    let probability =
        probability_bps(current_reserves.0, current_reserves.1, hook.yes_is_token0);
    record_snapshot(hook, now, slot, probability);

    if cfg.impact_guard_enabled {
        let pre = cache
            .take(pool_id)
            .ok_or(HookError::MissingPreTradeSnapshot)?;
        check_price_impact(pre, current_reserves, hook.yes_is_token0, cfg.max_price_impact_bps)?;
    }

    cache.clear();
    Ok(())
}
