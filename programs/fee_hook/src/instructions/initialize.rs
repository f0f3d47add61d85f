//! Protocol Initialization
//!
//! Sets up the global configuration for the hook protocol: the owner and
//! registrar roles, the resolution oracle, and the default fee
//! configuration. This is typically called once during deployment.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::state::{FeeConfig, HookConfig};

/// Accounts required for protocol initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Deployer (becomes the owner)
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = owner,
        space = 8 + HookConfig::INIT_SPACE,
        seeds = [HookConfig::SEED],
        bump,
    )]
    pub config: Account<'info, HookConfig>,

    /// Collateral token mint (e.g., USDC)
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Initialize the protocol configuration. The default fee configuration
    /// is validated like any other configuration write.
    pub fn initialize(
        &mut self,
        registrar: Pubkey,
        oracle: Pubkey,
        default_fees: FeeConfig,
        bumps: InitializeBumps,
    ) -> Result<()> {
        default_fees.validate()?;

        self.config.set_inner(HookConfig {
            owner: self.owner.key(),
            registrar,
            oracle,
            collateral_mint: self.collateral_mint.key(),
            market_count: 0,
            default_fees,
            bump: bumps.config,
        });

        msg!("Hook protocol initialized");
        msg!("Owner: {}", self.owner.key());
        msg!("Registrar: {}", registrar);
        msg!("Oracle: {}", oracle);

        Ok(())
    }
}
