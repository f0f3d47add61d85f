//! Price History & Volatility Estimation
//!
//! A fixed-depth circular log of (timestamp, probability) observations per
//! pool, written on post-trade callbacks. At most one snapshot is stored per
//! slot, which closes the window where a single block of trades could paint
//! the history. The volatility estimate is the mean absolute deviation of
//! the fresh snapshots, expressed as a percentage of their mean.

use anchor_lang::prelude::*;

use crate::hook::MIN_VOLATILITY_SAMPLES;
use crate::state::hook::{HookState, PriceSnapshot, PRICE_HISTORY_DEPTH};

/// Volatility summary over the fresh portion of a pool's price history.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VolatilityEstimate {
    /// Dispersion as a percentage of the mean (mean absolute deviation)
    pub dispersion_pct: u64,
    /// Number of snapshots that informed the estimate
    pub samples: u8,
    /// Arithmetic mean probability of those snapshots
    pub mean_bps: u64,
}

/// Append a probability observation, unless one was already recorded in this
/// slot. The ring overwrites its oldest entry once full.
pub fn record_snapshot(state: &mut HookState, now: i64, slot: u64, probability_bps: u16) {
    if state.snapshot_count > 0 && state.last_snapshot_slot == slot {
        return;
    }

    let idx = state.snapshot_index as usize;
    state.snapshots[idx] = PriceSnapshot {
        timestamp: now,
        probability_bps,
    };
    state.snapshot_index = ((idx + 1) % PRICE_HISTORY_DEPTH) as u8;
    state.snapshot_count = state.snapshot_count.saturating_add(1).min(PRICE_HISTORY_DEPTH as u8);
    state.last_snapshot_slot = slot;
}

/// Volatility over snapshots no older than `window_secs` (0 = no staleness
/// filter). Fewer than three fresh samples yields the zero estimate; a
/// degenerate zero mean also yields zero dispersion rather than failing.
pub fn volatility(state: &HookState, window_secs: u32, now: i64) -> VolatilityEstimate {
    let fresh: Vec<&PriceSnapshot> = state
        .valid_snapshots()
        .iter()
        .filter(|s| window_secs == 0 || now.saturating_sub(s.timestamp) <= window_secs as i64)
        .collect();

    if fresh.len() < MIN_VOLATILITY_SAMPLES {
        return VolatilityEstimate::default();
    }

    let n = fresh.len() as u64;
    let sum: u64 = fresh.iter().map(|s| s.probability_bps as u64).sum();
    let mean = sum / n;
    if mean == 0 {
        return VolatilityEstimate {
            dispersion_pct: 0,
            samples: fresh.len() as u8,
            mean_bps: 0,
        };
    }

    let abs_dev_sum: u64 = fresh
        .iter()
        .map(|s| (s.probability_bps as u64).abs_diff(mean))
        .sum();
    let mad = abs_dev_sum / n;

    VolatilityEstimate {
        dispersion_pct: mad * 100 / mean,
        samples: fresh.len() as u8,
        mean_bps: mean,
    }
}
