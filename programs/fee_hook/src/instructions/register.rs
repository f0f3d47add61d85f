//! Market Registration
//!
//! Binds a market to its pool and hook state. Registration stamps the
//! bootstrap start, fixes the outcome-token ordering, and activates the
//! engine for the pool. The bootstrap start can later be delayed by the
//! owner, but only while the pool is still empty.

use anchor_lang::prelude::*;

use crate::hook::HookError;
use crate::state::{HookConfig, HookState, Market, Pool, PriceSnapshot, PRICE_HISTORY_DEPTH};

/// Event emitted when a market is registered with the engine
#[event]
pub struct MarketRegistered {
    pub market: Pubkey,
    pub pool: Pubkey,
    pub bootstrap_start: i64,
    pub yes_is_token0: bool,
}

/// Event emitted when a pool's bootstrap start is delayed
#[event]
pub struct BootstrapStartAdjusted {
    pub pool: Pubkey,
    pub previous_start: i64,
    pub new_start: i64,
    pub timestamp: i64,
}

/// Accounts for registering a market
#[derive(Accounts)]
pub struct RegisterMarket<'info> {
    /// Owner or the designated registrar
    #[account(
        mut,
        constraint = registrar.key() == config.owner || registrar.key() == config.registrar
            @ HookError::Unauthorized
    )]
    pub registrar: Signer<'info>,

    #[account(
        seeds = [HookConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, HookConfig>,

    /// Market to register
    pub market: Account<'info, Market>,

    /// The pool, derived deterministically from the market
    #[account(
        init_if_needed,
        payer = registrar,
        space = 8 + Pool::INIT_SPACE,
        seeds = [Pool::SEED, market.key().as_ref()],
        bump,
    )]
    pub pool: Account<'info, Pool>,

    /// Engine state for the pool
    #[account(
        init_if_needed,
        payer = registrar,
        space = 8 + HookState::INIT_SPACE,
        seeds = [HookState::SEED, market.key().as_ref()],
        bump,
    )]
    pub hook_state: Account<'info, HookState>,

    pub system_program: Program<'info, System>,
}

impl<'info> RegisterMarket<'info> {
    pub fn register_market(&mut self, bumps: RegisterMarketBumps) -> Result<Pubkey> {
        let now = Clock::get()?.unix_timestamp;

        require!(!self.market.resolved, HookError::MarketClosed);
        require!(now < self.market.close_time, HookError::MarketClosed);
        require!(!self.hook_state.active, HookError::AlreadyRegistered);

        // Outcome mints sort by address into the token0/token1 slots; the
        // flag remembers which side the YES mint landed on.
        let yes_is_token0 = self.market.yes_mint < self.market.no_mint;
        let (token0, token1) = if yes_is_token0 {
            (self.market.yes_mint, self.market.no_mint)
        } else {
            (self.market.no_mint, self.market.yes_mint)
        };

        self.pool.set_inner(Pool {
            market: self.market.key(),
            token0,
            token1,
            reserve0: 0,
            reserve1: 0,
            bump: bumps.pool,
        });

        self.hook_state.set_inner(HookState {
            market: self.market.key(),
            pool: self.pool.key(),
            bootstrap_start: now,
            active: true,
            yes_is_token0,
            snapshots: [PriceSnapshot::default(); PRICE_HISTORY_DEPTH],
            snapshot_index: 0,
            snapshot_count: 0,
            last_snapshot_slot: 0,
            bump: bumps.hook_state,
        });

        emit!(MarketRegistered {
            market: self.market.key(),
            pool: self.pool.key(),
            bootstrap_start: now,
            yes_is_token0,
        });
        msg!("Market {} registered, pool {}", self.market.id, self.pool.key());

        Ok(self.pool.key())
    }
}

/// Accounts for delaying a pool's bootstrap start
#[derive(Accounts)]
pub struct AdjustBootstrapStart<'info> {
    #[account(
        constraint = owner.key() == config.owner @ HookError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        seeds = [HookConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, HookConfig>,

    #[account(
        constraint = market.key() == hook_state.market @ HookError::InvalidMarket
    )]
    pub market: Account<'info, Market>,

    #[account(
        constraint = pool.key() == hook_state.pool @ HookError::InvalidPoolId
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [HookState::SEED, hook_state.market.as_ref()],
        bump = hook_state.bump,
        constraint = hook_state.active @ HookError::InvalidPoolId,
    )]
    pub hook_state: Account<'info, HookState>,
}

impl<'info> AdjustBootstrapStart<'info> {
    pub fn adjust_bootstrap_start(&mut self, new_start: i64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        require!(!self.market.resolved, HookError::MarketClosed);
        require!(now < self.market.close_time, HookError::MarketClosed);

        validate_bootstrap_adjustment(
            self.hook_state.bootstrap_start,
            new_start,
            now,
            self.market.close_time,
            self.pool.has_liquidity(),
        )?;

        let previous_start = self.hook_state.bootstrap_start;
        self.hook_state.bootstrap_start = new_start;

        emit!(BootstrapStartAdjusted {
            pool: self.pool.key(),
            previous_start,
            new_start,
            timestamp: now,
        });
        Ok(())
    }
}

/// Rules for delaying a bootstrap start. The start may only move forward,
/// never into the future or past the market's close, and never once the
/// pool holds liquidity; with liquidity present even a no-op rewrite is
/// refused.
pub fn validate_bootstrap_adjustment(
    current_start: i64,
    new_start: i64,
    now: i64,
    close_time: i64,
    has_liquidity: bool,
) -> Result<()> {
    require!(!has_liquidity, HookError::InvalidBootstrapStart);
    require!(new_start >= current_start, HookError::InvalidBootstrapStart);
    require!(new_start <= now, HookError::InvalidBootstrapStart);
    require!(new_start < close_time, HookError::InvalidBootstrapStart);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rejected(res: Result<()>) {
        let err = res.unwrap_err();
        assert!(err.to_string().contains("InvalidBootstrapStart"), "{err}");
    }

    #[test]
    fn delay_within_bounds_is_allowed() {
        // Registered at 100, delayed to 150, now 200, close 1000.
        validate_bootstrap_adjustment(100, 150, 200, 1000, false).unwrap();
    }

    #[test]
    fn start_cannot_move_backwards() {
        assert_rejected(validate_bootstrap_adjustment(100, 99, 200, 1000, false));
    }

    #[test]
    fn start_cannot_be_in_the_future() {
        assert_rejected(validate_bootstrap_adjustment(100, 300, 200, 1000, false));
    }

    #[test]
    fn start_cannot_reach_close_time() {
        assert_rejected(validate_bootstrap_adjustment(100, 1000, 2000, 1000, false));
    }

    #[test]
    fn any_liquidity_freezes_the_start() {
        assert_rejected(validate_bootstrap_adjustment(100, 150, 200, 1000, true));
        // Even the no-op rewrite is refused once liquidity exists.
        assert_rejected(validate_bootstrap_adjustment(100, 100, 200, 1000, true));
    }

    #[test]
    fn no_op_without_liquidity_is_allowed() {
        validate_bootstrap_adjustment(100, 100, 200, 1000, false).unwrap();
    }

    #[test]
    fn pool_id_is_deterministic_and_bijective_per_market() {
        let market_a = Pubkey::new_unique();
        let market_b = Pubkey::new_unique();
        let (pool_a, _) = Pubkey::find_program_address(&[Pool::SEED, market_a.as_ref()], &crate::ID);
        let (pool_a_again, _) =
            Pubkey::find_program_address(&[Pool::SEED, market_a.as_ref()], &crate::ID);
        let (pool_b, _) = Pubkey::find_program_address(&[Pool::SEED, market_b.as_ref()], &crate::ID);
        assert_eq!(pool_a, pool_a_again);
        assert_ne!(pool_a, pool_b);
    }
}
