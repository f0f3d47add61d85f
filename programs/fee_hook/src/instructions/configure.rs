//! Fee Configuration Management
//!
//! Owner-only writes to the configuration store: the protocol default and
//! per-market overrides. Every write is validated atomically; an invalid
//! configuration is rejected in its entirety. Deleting a market override
//! closes its account and reverts the market to the default.

use anchor_lang::prelude::*;

use crate::hook::HookError;
use crate::state::{FeeConfig, HookConfig, Market, MarketFeeConfig};

/// Event emitted when the default configuration changes
#[event]
pub struct DefaultConfigUpdated {
    pub owner: Pubkey,
    pub fees: FeeConfig,
    pub timestamp: i64,
}

/// Event emitted when a market override is written
#[event]
pub struct MarketConfigSet {
    pub market: Pubkey,
    pub fees: FeeConfig,
    pub timestamp: i64,
}

/// Event emitted when a market override is removed
#[event]
pub struct MarketConfigCleared {
    pub market: Pubkey,
    pub timestamp: i64,
}

/// Accounts for updating the default configuration
#[derive(Accounts)]
pub struct SetDefaultConfig<'info> {
    #[account(
        constraint = owner.key() == config.owner @ HookError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [HookConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, HookConfig>,
}

impl<'info> SetDefaultConfig<'info> {
    pub fn set_default_config(&mut self, fees: FeeConfig) -> Result<()> {
        fees.validate()?;
        self.config.default_fees = fees;

        emit!(DefaultConfigUpdated {
            owner: self.owner.key(),
            fees,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}

/// Accounts for writing a per-market override
#[derive(Accounts)]
pub struct SetMarketConfig<'info> {
    #[account(
        mut,
        constraint = owner.key() == config.owner @ HookError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        seeds = [HookConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, HookConfig>,

    /// Market the override applies to
    pub market: Account<'info, Market>,

    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + MarketFeeConfig::INIT_SPACE,
        seeds = [MarketFeeConfig::SEED, market.key().as_ref()],
        bump,
    )]
    pub market_fees: Account<'info, MarketFeeConfig>,

    pub system_program: Program<'info, System>,
}

impl<'info> SetMarketConfig<'info> {
    pub fn set_market_config(&mut self, fees: FeeConfig, bumps: SetMarketConfigBumps) -> Result<()> {
        fees.validate()?;

        self.market_fees.set_inner(MarketFeeConfig {
            market: self.market.key(),
            fees,
            bump: bumps.market_fees,
        });

        emit!(MarketConfigSet {
            market: self.market.key(),
            fees,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}

/// Accounts for removing a per-market override
#[derive(Accounts)]
pub struct ClearMarketConfig<'info> {
    #[account(
        mut,
        constraint = owner.key() == config.owner @ HookError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        seeds = [HookConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, HookConfig>,

    /// Closing the override reverts the market to the default configuration
    #[account(
        mut,
        close = owner,
        seeds = [MarketFeeConfig::SEED, market_fees.market.as_ref()],
        bump = market_fees.bump,
    )]
    pub market_fees: Account<'info, MarketFeeConfig>,
}

impl<'info> ClearMarketConfig<'info> {
    pub fn clear_market_config(&mut self) -> Result<()> {
        emit!(MarketConfigCleared {
            market: self.market_fees.market,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}
