//! Pool Liquidity
//!
//! Complete-set funding: collateral backs equal amounts of both outcome
//! tokens, so liquidity moves both reserves together and leaves the implied
//! probability untouched. Liquidity operations route through the hook
//! dispatcher but are exempt from its registration gate, so withdrawal is
//! always possible, even from a halted pool.

use anchor_lang::prelude::*;

use crate::hook::{after_trade, before_trade, HookError, HookOp, ReserveCache};
use crate::state::{effective_fees, HookConfig, HookState, Market, MarketFeeConfig, Pool};

/// Event emitted when liquidity is added
#[event]
pub struct LiquidityAdded {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Event emitted when liquidity is removed
#[event]
pub struct LiquidityRemoved {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Accounts for liquidity changes
#[derive(Accounts)]
pub struct ModifyLiquidity<'info> {
    #[account(mut)]
    pub provider: Signer<'info>,

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

impl<'info> ModifyLiquidity<'info> {
    pub fn add_liquidity(&mut self, amount: u64) -> Result<()> {
        self.modify(HookOp::AddLiquidity, amount)?;

        self.pool.reserve0 = self
            .pool
            .reserve0
            .checked_add(amount)
            .ok_or(LiquidityError::Overflow)?;
        self.pool.reserve1 = self
            .pool
            .reserve1
            .checked_add(amount)
            .ok_or(LiquidityError::Overflow)?;

        emit!(LiquidityAdded {
            pool: self.pool.key(),
            provider: self.provider.key(),
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn remove_liquidity(&mut self, amount: u64) -> Result<()> {
        require!(
            amount <= self.pool.reserve0.min(self.pool.reserve1),
            LiquidityError::InsufficientLiquidity
        );

        self.modify(HookOp::RemoveLiquidity, amount)?;

        self.pool.reserve0 -= amount;
        self.pool.reserve1 -= amount;

        emit!(LiquidityRemoved {
            pool: self.pool.key(),
            provider: self.provider.key(),
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    /// Run the hook callback pair for a liquidity operation. The dispatcher
    /// treats these as no-ops but still owns the cache lifecycle.
    fn modify(&mut self, op: HookOp, amount: u64) -> Result<()> {
        require!(amount > 0, LiquidityError::ZeroAmount);

        let clock = Clock::get()?;
        let cfg = effective_fees(&self.config, self.market_fees.as_deref());
        let pool_id = self.pool.key();
        let mut cache = ReserveCache::new(pool_id);

        before_trade(
            op,
            Some(&self.hook_state),
            self.market.resolved,
            self.market.close_time,
            &cfg,
            &pool_id,
            self.pool.reserves(),
            &mut cache,
            clock.unix_timestamp,
        )?;
        after_trade(
            op,
            None,
            &cfg,
            &pool_id,
            self.pool.reserves(),
            &mut cache,
            clock.unix_timestamp,
            clock.slot,
        )
    }
}

#[error_code]
pub enum LiquidityError {
    #[msg("Amount must be positive")]
    ZeroAmount,
    #[msg("Not enough liquidity in the pool")]
    InsufficientLiquidity,
    #[msg("Arithmetic overflow")]
    Overflow,
}
