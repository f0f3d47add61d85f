//! Protocol Administration
//!
//! Ownership transfer and the emergency lamport withdrawal. Ownership moves
//! in a single step; the zero address is rejected so the protocol cannot be
//! orphaned by accident.

use anchor_lang::prelude::*;

use crate::hook::HookError;
use crate::state::HookConfig;

/// Event emitted when ownership changes hands
#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
    pub timestamp: i64,
}

/// Event emitted on an emergency lamport withdrawal
#[event]
pub struct NativeWithdrawn {
    pub owner: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Accounts for transferring protocol ownership
#[derive(Accounts)]
pub struct TransferOwnership<'info> {
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

impl<'info> TransferOwnership<'info> {
    pub fn transfer_ownership(&mut self, new_owner: Pubkey) -> Result<()> {
        require!(new_owner != Pubkey::default(), HookError::Unauthorized);

        let previous_owner = self.config.owner;
        self.config.owner = new_owner;

        emit!(OwnershipTransferred {
            previous_owner,
            new_owner,
            timestamp: Clock::get()?.unix_timestamp,
        });
        msg!("Ownership transferred to {}", new_owner);
        Ok(())
    }
}

/// Accounts for the emergency native-asset withdrawal
#[derive(Accounts)]
pub struct WithdrawNative<'info> {
    #[account(
        mut,
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

impl<'info> WithdrawNative<'info> {
    /// Move lamports accidentally sent to the config account back to the
    /// owner, keeping the account rent-exempt.
    pub fn withdraw_native(&mut self, amount: u64) -> Result<()> {
        let config_info = self.config.to_account_info();
        let rent_floor = Rent::get()?.minimum_balance(config_info.data_len());
        let available = config_info
            .lamports()
            .saturating_sub(rent_floor);
        require!(amount <= available, HookError::Overflow);

        **config_info.try_borrow_mut_lamports()? -= amount;
        **self.owner.to_account_info().try_borrow_mut_lamports()? += amount;

        emit!(NativeWithdrawn {
            owner: self.owner.key(),
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}
