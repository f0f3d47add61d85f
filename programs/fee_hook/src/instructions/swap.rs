//! Outcome Token Swaps
//!
//! The trade path: the hook's pre-trade callback quotes the dynamic fee (or
//! the sentinel, which blocks the trade without touching the pool), the
//! constant-product curve prices the swap, and the post-trade callback
//! records the price snapshot and enforces the impact bound against the
//! reserves it captured before the trade.

use anchor_lang::prelude::*;

use crate::amm::constant_product;
use crate::hook::{
    after_trade, before_trade, HookError, HookOp, ReserveCache, FEE_SENTINEL_BPS,
};
use crate::state::{effective_fees, HookConfig, HookState, Market, MarketFeeConfig, Pool};

/// Event emitted on every executed swap
#[event]
pub struct SwapExecuted {
    pub pool: Pubkey,
    pub trader: Pubkey,
    pub zero_for_one: bool,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee_bps: u16,
    pub timestamp: i64,
}

/// Accounts for swapping between a market's outcome tokens
#[derive(Accounts)]
pub struct Swap<'info> {
    pub trader: Signer<'info>,

    #[account(
        seeds = [HookConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, HookConfig>,

    #[account(
        constraint = market.key() == pool.market @ HookError::InvalidMarket
    )]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [Pool::SEED, pool.market.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [HookState::SEED, pool.market.as_ref()],
        bump = hook_state.bump,
        constraint = hook_state.market == market.key() @ HookError::InvalidMarket,
    )]
    pub hook_state: Account<'info, HookState>,

    /// Per-market fee override, if one exists
    #[account(
        seeds = [MarketFeeConfig::SEED, pool.market.as_ref()],
        bump = market_fees.bump,
    )]
    pub market_fees: Option<Account<'info, MarketFeeConfig>>,
}

impl<'info> Swap<'info> {
    pub fn swap(&mut self, amount_in: u64, zero_for_one: bool, min_amount_out: u64) -> Result<u64> {
        let clock = Clock::get()?;
        let now = clock.unix_timestamp;
        let cfg = effective_fees(&self.config, self.market_fees.as_deref());
        let pool_id = self.pool.key();

        // One cache per instruction: it exists only for this callback pair.
        let mut cache = ReserveCache::new(pool_id);

        let fee_bps = before_trade(
            HookOp::Swap,
            Some(&self.hook_state),
            self.market.resolved,
            self.market.close_time,
            &cfg,
            &pool_id,
            self.pool.reserves(),
            &mut cache,
            now,
        )?;

        // The sentinel is a data signal from the engine; the trade venue is
        // the one that refuses to act on it.
        require!(fee_bps != FEE_SENTINEL_BPS, TradeError::TradingHalted);

        let (reserve_in, reserve_out) = if zero_for_one {
            (self.pool.reserve0, self.pool.reserve1)
        } else {
            (self.pool.reserve1, self.pool.reserve0)
        };
        let amount_out = constant_product::amount_out(amount_in, reserve_in, reserve_out, fee_bps)?;
        require!(amount_out >= min_amount_out, TradeError::SlippageExceeded);

        let (reserve0, reserve1) = constant_product::reserves_after(
            self.pool.reserve0,
            self.pool.reserve1,
            amount_in,
            amount_out,
            zero_for_one,
        )?;
        self.pool.reserve0 = reserve0;
        self.pool.reserve1 = reserve1;

        after_trade(
            HookOp::Swap,
            Some(&mut self.hook_state),
            &cfg,
            &pool_id,
            (reserve0, reserve1),
            &mut cache,
            now,
            clock.slot,
        )?;

        emit!(SwapExecuted {
            pool: pool_id,
            trader: self.trader.key(),
            zero_for_one,
            amount_in,
            amount_out,
            fee_bps,
            timestamp: now,
        });

        Ok(amount_out)
    }
}

#[error_code]
pub enum TradeError {
    #[msg("Trading is halted for this market")]
    TradingHalted,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
}
