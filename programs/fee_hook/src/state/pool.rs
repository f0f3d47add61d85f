//! AMM Pool State
//!
//! Holds the reserves of the two outcome tokens of one market. The hook
//! engine reads reserves from here but never moves them; trades and
//! liquidity changes are applied by the instruction layer.

use anchor_lang::prelude::*;

/// Constant-product pool over a market's outcome tokens
///
/// Seeds: ["pool", market]
#[account]
#[derive(InitSpace)]
pub struct Pool {
    /// Market this pool trades
    pub market: Pubkey,

    /// Outcome mint with the lower address
    pub token0: Pubkey,

    /// Outcome mint with the higher address
    pub token1: Pubkey,

    /// Reserve of token0
    pub reserve0: u64,

    /// Reserve of token1
    pub reserve1: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Pool {
    pub const SEED: &'static [u8] = b"pool";

    pub fn reserves(&self) -> (u64, u64) {
        (self.reserve0, self.reserve1)
    }

    pub fn has_liquidity(&self) -> bool {
        self.reserve0 > 0 || self.reserve1 > 0
    }
}
