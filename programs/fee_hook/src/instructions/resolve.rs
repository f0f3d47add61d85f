//! Market Resolution
//!
//! The authorized oracle settles a market after its close time. The hook
//! engine reads only the resolved flag: a resolved market is Closed and its
//! pool reports the sentinel fee regardless of the clock.

use anchor_lang::prelude::*;

use crate::state::{HookConfig, Market, Outcome};

/// Event emitted when a market is resolved
#[event]
pub struct MarketResolved {
    pub market_id: u64,
    pub outcome: Outcome,
    pub resolver: Pubkey,
    pub timestamp: i64,
}

/// Accounts for market resolution
#[derive(Accounts)]
pub struct ResolveMarket<'info> {
    /// Oracle authorized to resolve markets
    #[account(
        constraint = oracle.key() == config.oracle @ ResolveError::Unauthorized
    )]
    pub oracle: Signer<'info>,

    /// Protocol configuration
    #[account(
        seeds = [HookConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, HookConfig>,

    /// Market to resolve
    #[account(
        mut,
        constraint = !market.resolved @ ResolveError::AlreadyResolved,
    )]
    pub market: Account<'info, Market>,
}

impl<'info> ResolveMarket<'info> {
    /// Resolve the market with the winning outcome
    pub fn resolve_market(&mut self, yes_wins: bool) -> Result<()> {
        let clock = Clock::get()?;

        // Ensure trading has ended
        require!(
            clock.unix_timestamp >= self.market.close_time,
            ResolveError::MarketNotEnded
        );

        self.market.outcome = if yes_wins { Outcome::Yes } else { Outcome::No };
        self.market.resolved = true;

        emit!(MarketResolved {
            market_id: self.market.id,
            outcome: self.market.outcome,
            resolver: self.oracle.key(),
            timestamp: clock.unix_timestamp,
        });

        msg!("Market {} resolved: {:?}", self.market.id, self.market.outcome);

        Ok(())
    }
}

#[error_code]
pub enum ResolveError {
    #[msg("Only the authorized oracle can resolve markets")]
    Unauthorized,
    #[msg("Market is already resolved")]
    AlreadyResolved,
    #[msg("Market has not ended yet")]
    MarketNotEnded,
}
