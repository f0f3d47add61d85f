//! Read-Only Views
//!
//! Query instructions for off-chain callers: current fee, open flag,
//! implied probability, volatility estimate, impact simulation, and a
//! combined status summary. All of them return data through the Anchor
//! return-value mechanism and mutate nothing. The raw price-history ring is
//! readable straight off the hook state account.

use anchor_lang::prelude::*;

use crate::hook::{
    current_fee_bps, is_open, market_phase, probability_bps, simulate_price_impact, volatility,
    HookError, VolatilityEstimate, FEE_SENTINEL_BPS,
};
use crate::state::{effective_fees, FeeConfig, HookConfig, HookState, Market, MarketFeeConfig, Pool};

/// Combined pool/market status summary
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct PoolStatus {
    pub fee_bps: u16,
    pub probability_bps: u16,
    pub is_open: bool,
    pub reserve0: u64,
    pub reserve1: u64,
    pub bootstrap_start: i64,
    pub close_time: i64,
    pub resolved: bool,
}

/// Accounts shared by every pool view
#[derive(Accounts)]
pub struct ViewPool<'info> {
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
        seeds = [Pool::SEED, pool.market.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [HookState::SEED, pool.market.as_ref()],
        bump = hook_state.bump,
    )]
    pub hook_state: Account<'info, HookState>,

    /// Per-market fee override, if one exists
    #[account(
        seeds = [MarketFeeConfig::SEED, pool.market.as_ref()],
        bump = market_fees.bump,
    )]
    pub market_fees: Option<Account<'info, MarketFeeConfig>>,
}

impl<'info> ViewPool<'info> {
    fn fees(&self) -> FeeConfig {
        effective_fees(&self.config, self.market_fees.as_deref())
    }

    fn fee_and_open(&self, now: i64) -> (u16, bool) {
        let cfg = self.fees();
        if !self.hook_state.active {
            return (FEE_SENTINEL_BPS, false);
        }
        let phase = market_phase(
            now,
            self.hook_state.bootstrap_start,
            cfg.bootstrap_window_secs,
            self.market.close_time,
            cfg.close_window_secs,
            self.market.resolved,
        );
        let probability = probability_bps(
            self.pool.reserve0,
            self.pool.reserve1,
            self.hook_state.yes_is_token0,
        );
        let vol = volatility(&self.hook_state, cfg.volatility_window_secs, now);
        let fee = current_fee_bps(
            &cfg,
            phase,
            now,
            self.hook_state.bootstrap_start,
            probability,
            vol,
        );
        (fee, is_open(phase, &cfg))
    }

    pub fn get_current_fee(&self) -> Result<u16> {
        let now = Clock::get()?.unix_timestamp;
        Ok(self.fee_and_open(now).0)
    }

    pub fn is_market_open(&self) -> Result<bool> {
        let now = Clock::get()?.unix_timestamp;
        Ok(self.fee_and_open(now).1)
    }

    pub fn get_probability(&self) -> Result<u16> {
        Ok(probability_bps(
            self.pool.reserve0,
            self.pool.reserve1,
            self.hook_state.yes_is_token0,
        ))
    }

    pub fn get_volatility(&self) -> Result<VolatilityEstimate> {
        let now = Clock::get()?.unix_timestamp;
        let cfg = self.fees();
        Ok(volatility(&self.hook_state, cfg.volatility_window_secs, now))
    }

    /// Probability shift a hypothetical trade would cause at the supplied
    /// fee. The sentinel passes through unchanged.
    pub fn get_price_impact(
        &self,
        amount_in: u64,
        zero_for_one: bool,
        fee_bps: u16,
    ) -> Result<u16> {
        simulate_price_impact(
            self.pool.reserve0,
            self.pool.reserve1,
            self.hook_state.yes_is_token0,
            amount_in,
            zero_for_one,
            fee_bps,
        )
    }

    pub fn get_pool_status(&self) -> Result<PoolStatus> {
        let now = Clock::get()?.unix_timestamp;
        let (fee_bps, open) = self.fee_and_open(now);
        Ok(PoolStatus {
            fee_bps,
            probability_bps: probability_bps(
                self.pool.reserve0,
                self.pool.reserve1,
                self.hook_state.yes_is_token0,
            ),
            is_open: open,
            reserve0: self.pool.reserve0,
            reserve1: self.pool.reserve1,
            bootstrap_start: self.hook_state.bootstrap_start,
            close_time: self.market.close_time,
            resolved: self.market.resolved,
        })
    }
}
