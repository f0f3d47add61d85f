//! Hook Engine Pool State
//!
//! Per-pool registration metadata plus the bounded price-history ring used
//! by the volatility estimator. Created once at registration and never
//! deleted; a pool past its market's close time is recognized by time, not
//! by mutating this account.

use anchor_lang::prelude::*;

/// Number of snapshots retained per pool.
pub const PRICE_HISTORY_DEPTH: usize = 10;

/// One probability observation, taken at most once per slot.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PriceSnapshot {
    /// Unix timestamp of the observation
    pub timestamp: i64,
    /// Implied YES probability at that time
    pub probability_bps: u16,
}

/// Engine-side state for one registered pool
///
/// Seeds: ["hook", market]
#[account]
#[derive(InitSpace)]
pub struct HookState {
    /// Market this pool is bound to
    pub market: Pubkey,

    /// The AMM pool account
    pub pool: Pubkey,

    /// Start of the bootstrap fee decay; set to registration time, may only
    /// ever be delayed, and only while the pool is empty
    pub bootstrap_start: i64,

    /// Set once at registration; a trade on a pool without this is rejected
    pub active: bool,

    /// Whether the YES mint sorted into the token0 slot
    pub yes_is_token0: bool,

    /// Circular price history, oldest entries overwritten on wrap
    pub snapshots: [PriceSnapshot; PRICE_HISTORY_DEPTH],

    /// Next write position, 0..PRICE_HISTORY_DEPTH
    pub snapshot_index: u8,

    /// Number of valid entries, saturating at PRICE_HISTORY_DEPTH
    pub snapshot_count: u8,

    /// Slot of the most recent write, used to dedupe same-slot snapshots
    pub last_snapshot_slot: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl HookState {
    pub const SEED: &'static [u8] = b"hook";

    /// Valid snapshots, unordered. Ring order does not matter to the
    /// volatility estimator.
    pub fn valid_snapshots(&self) -> &[PriceSnapshot] {
        &self.snapshots[..self.snapshot_count as usize]
    }
}

#[cfg(test)]
pub(crate) fn test_hook_state() -> HookState {
    HookState {
        market: Pubkey::new_unique(),
        pool: Pubkey::new_unique(),
        bootstrap_start: 0,
        active: true,
        yes_is_token0: true,
        snapshots: [PriceSnapshot::default(); PRICE_HISTORY_DEPTH],
        snapshot_index: 0,
        snapshot_count: 0,
        last_snapshot_slot: 0,
        bump: 255,
    }
}
