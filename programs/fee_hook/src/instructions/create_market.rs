//! Market Creation
//!
//! Creates a registry entry for a yes/no prediction and its outcome-token
//! mints. Creation does not open trading: a market only becomes tradable
//! once it is registered with the hook engine and its pool is funded.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::state::{HookConfig, Market, Outcome};

/// Event emitted when a new market is created
#[event]
pub struct MarketCreated {
    pub market_id: u64,
    pub creator: Pubkey,
    pub question: String,
    pub close_time: i64,
}

/// Accounts for creating a new prediction market
#[derive(Accounts)]
pub struct CreateMarket<'info> {
    /// Market creator (pays for accounts)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Global protocol configuration
    #[account(
        mut,
        seeds = [HookConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, HookConfig>,

    /// The new market account
    #[account(
        init,
        payer = creator,
        space = 8 + Market::INIT_SPACE,
        seeds = [Market::SEED, config.market_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Account<'info, Market>,

    /// YES token mint (created for this market)
    #[account(
        init,
        payer = creator,
        mint::decimals = collateral_mint.decimals,
        mint::authority = config,
        seeds = [b"yes_mint", config.market_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub yes_mint: InterfaceAccount<'info, Mint>,

    /// NO token mint (created for this market)
    #[account(
        init,
        payer = creator,
        mint::decimals = collateral_mint.decimals,
        mint::authority = config,
        seeds = [b"no_mint", config.market_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub no_mint: InterfaceAccount<'info, Mint>,

    /// Collateral token mint
    #[account(
        constraint = collateral_mint.key() == config.collateral_mint
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// Token program
    pub token_program: Interface<'info, anchor_spl::token_interface::TokenInterface>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> CreateMarket<'info> {
    pub fn create_market(
        &mut self,
        question: String,
        close_time: i64,
        bumps: CreateMarketBumps,
    ) -> Result<()> {
        let clock = Clock::get()?;

        require!(close_time > clock.unix_timestamp, CreateMarketError::InvalidCloseTime);
        require!(question.len() <= 256, CreateMarketError::QuestionTooLong);

        let market_id = self.config.market_count;

        self.market.set_inner(Market {
            id: market_id,
            creator: self.creator.key(),
            question: question.clone(),
            close_time,
            created_at: clock.unix_timestamp,
            yes_mint: self.yes_mint.key(),
            no_mint: self.no_mint.key(),
            collateral_mint: self.collateral_mint.key(),
            resolved: false,
            outcome: Outcome::Undetermined,
            bump: bumps.market,
        });

        self.config.market_count += 1;

        emit!(MarketCreated {
            market_id,
            creator: self.creator.key(),
            question,
            close_time,
        });

        Ok(())
    }
}

#[error_code]
pub enum CreateMarketError {
    #[msg("Close time must be in the future")]
    InvalidCloseTime,
    #[msg("Question exceeds maximum length")]
    QuestionTooLong,
}
