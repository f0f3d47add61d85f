//! # Prediction Market Fee Hook
//!
//! A venue for binary prediction markets on Solana: YES/NO outcome tokens
//! traded through a constant-product AMM, settled by an oracle, and wrapped
//! in a dynamic fee and risk-control engine.
//!
//! ## The engine
//!
//! Before every trade the AMM path asks the engine for a fee; after the
//! trade it reports back so the engine can log a price snapshot and check
//! the price impact against the reserves it captured up front. The fee is
//! assembled from independently switchable components:
//!
//! - **Bootstrap decay** - starts high at registration and decays to a
//!   floor over a configurable window, along one of four curve shapes
//! - **Skew** - grows as the implied probability leaves the 50/50 midpoint
//! - **Asymmetric** - a linear surcharge on one-sided books
//! - **Volatility** - scales with the dispersion of recent price snapshots
//!
//! A market past its close time (or resolved) reports the sentinel fee
//! `10001` - "do not trade" as data, not as an error.

use anchor_lang::prelude::*;

pub mod amm;
pub mod hook;
pub mod instructions;
pub mod state;

pub use amm::*;
pub use instructions::*;

use crate::hook::VolatilityEstimate;
use crate::instructions::views::PoolStatus;
use crate::state::FeeConfig;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Main fee hook program
#[program]
pub mod fee_hook {
    use super::*;

    /// Initialize the protocol with roles and the default fee configuration
    pub fn initialize(
        ctx: Context<Initialize>,
        registrar: Pubkey,
        oracle: Pubkey,
        default_fees: FeeConfig,
    ) -> Result<()> {
        ctx.accounts.initialize(registrar, oracle, default_fees, ctx.bumps)
    }

    /// Replace the default fee configuration (owner only)
    pub fn set_default_config(ctx: Context<SetDefaultConfig>, fees: FeeConfig) -> Result<()> {
        ctx.accounts.set_default_config(fees)
    }

    /// Write a per-market fee override (owner only)
    pub fn set_market_config(ctx: Context<SetMarketConfig>, fees: FeeConfig) -> Result<()> {
        ctx.accounts.set_market_config(fees, ctx.bumps)
    }

    /// Remove a per-market override, reverting to the default (owner only)
    pub fn clear_market_config(ctx: Context<ClearMarketConfig>) -> Result<()> {
        ctx.accounts.clear_market_config()
    }

    /// Hand the owner role to another account (owner only)
    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        ctx.accounts.transfer_ownership(new_owner)
    }

    /// Recover lamports sent to the config account (owner only)
    pub fn withdraw_native(ctx: Context<WithdrawNative>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw_native(amount)
    }

    /// Create a prediction market registry entry
    pub fn create_market(
        ctx: Context<CreateMarket>,
        question: String,
        close_time: i64,
    ) -> Result<()> {
        ctx.accounts.create_market(question, close_time, ctx.bumps)
    }

    /// Bind a market to its pool and activate the hook engine for it
    pub fn register_market(ctx: Context<RegisterMarket>) -> Result<Pubkey> {
        ctx.accounts.register_market(ctx.bumps)
    }

    /// Delay a pool's bootstrap start (owner only, empty pool only)
    pub fn adjust_bootstrap_start(
        ctx: Context<AdjustBootstrapStart>,
        new_start: i64,
    ) -> Result<()> {
        ctx.accounts.adjust_bootstrap_start(new_start)
    }

    /// Fund a pool with equal amounts of both outcome tokens
    pub fn add_liquidity(ctx: Context<ModifyLiquidity>, amount: u64) -> Result<()> {
        ctx.accounts.add_liquidity(amount)
    }

    /// Drain equal amounts of both outcome tokens from a pool
    pub fn remove_liquidity(ctx: Context<ModifyLiquidity>, amount: u64) -> Result<()> {
        ctx.accounts.remove_liquidity(amount)
    }

    /// Swap between a market's outcome tokens through the hook callbacks
    pub fn swap(
        ctx: Context<Swap>,
        amount_in: u64,
        zero_for_one: bool,
        min_amount_out: u64,
    ) -> Result<u64> {
        ctx.accounts.swap(amount_in, zero_for_one, min_amount_out)
    }

    /// Resolve the market (oracle only)
    pub fn resolve_market(ctx: Context<ResolveMarket>, yes_wins: bool) -> Result<()> {
        ctx.accounts.resolve_market(yes_wins)
    }

    /// Current fee in bps, or the sentinel for halted/closed pools
    pub fn get_current_fee(ctx: Context<ViewPool>) -> Result<u16> {
        ctx.accounts.get_current_fee()
    }

    /// Whether the pool currently accepts trades
    pub fn is_market_open(ctx: Context<ViewPool>) -> Result<bool> {
        ctx.accounts.is_market_open()
    }

    /// Market-implied probability of the YES outcome, in bps
    pub fn get_probability(ctx: Context<ViewPool>) -> Result<u16> {
        ctx.accounts.get_probability()
    }

    /// Volatility estimate over the fresh price history
    pub fn get_volatility(ctx: Context<ViewPool>) -> Result<VolatilityEstimate> {
        ctx.accounts.get_volatility()
    }

    /// Probability shift a hypothetical trade would cause
    pub fn get_price_impact(
        ctx: Context<ViewPool>,
        amount_in: u64,
        zero_for_one: bool,
        fee_bps: u16,
    ) -> Result<u16> {
        ctx.accounts.get_price_impact(amount_in, zero_for_one, fee_bps)
    }

    /// Combined pool/market status summary
    pub fn get_pool_status(ctx: Context<ViewPool>) -> Result<PoolStatus> {
        ctx.accounts.get_pool_status()
    }
}
