//! # Constant-Product Swap Math
//!
//! The pool holds reserves of a market's two outcome tokens and prices
//! swaps with the `x * y = k` invariant. The fee is charged on the input
//! side and stays in the pool:
//!
//! ```text
//! in_with_fee = amount_in * (10000 - fee_bps)
//! out         = in_with_fee * reserve_out
//!               ------------------------------------
//!               reserve_in * 10000 + in_with_fee
//! ```
//!
//! The output is always strictly less than `reserve_out`, so a swap can
//! approach but never drain a side of the pool.

use anchor_lang::prelude::*;

use crate::state::config::BPS_DENOM;

/// Errors specific to the swap math
#[error_code]
pub enum CurveError {
    #[msg("Pool has no liquidity on the required side")]
    InsufficientLiquidity,
    #[msg("Swap input must be positive")]
    ZeroAmount,
    #[msg("Arithmetic overflow")]
    Overflow,
}

/// Output amount for a constant-product swap with an input-side fee.
///
/// A fee of 10000 bps (100%) admits no output.
pub fn amount_out(amount_in: u64, reserve_in: u64, reserve_out: u64, fee_bps: u16) -> Result<u64> {
    require!(amount_in > 0, CurveError::ZeroAmount);
    require!(reserve_in > 0 && reserve_out > 0, CurveError::InsufficientLiquidity);

    if fee_bps >= BPS_DENOM {
        return Ok(0);
    }

    let in_with_fee = (amount_in as u128)
        .checked_mul((BPS_DENOM - fee_bps) as u128)
        .ok_or(CurveError::Overflow)?;
    let numerator = in_with_fee
        .checked_mul(reserve_out as u128)
        .ok_or(CurveError::Overflow)?;
    let denominator = (reserve_in as u128)
        .checked_mul(BPS_DENOM as u128)
        .ok_or(CurveError::Overflow)?
        .checked_add(in_with_fee)
        .ok_or(CurveError::Overflow)?;

    Ok((numerator / denominator) as u64)
}

/// Reserves after swapping `amount_in` of the input side for `out` of the
/// output side, oriented as (reserve0, reserve1).
pub fn reserves_after(
    reserve0: u64,
    reserve1: u64,
    amount_in: u64,
    amount_out: u64,
    zero_for_one: bool,
) -> Result<(u64, u64)> {
    if zero_for_one {
        Ok((
            reserve0.checked_add(amount_in).ok_or(CurveError::Overflow)?,
            reserve1.checked_sub(amount_out).ok_or(CurveError::Overflow)?,
        ))
    } else {
        Ok((
            reserve0.checked_sub(amount_out).ok_or(CurveError::Overflow)?,
            reserve1.checked_add(amount_in).ok_or(CurveError::Overflow)?,
        ))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fee_matches_plain_constant_product() {
        // x=y=1000, in=100: out = 100*1000/1100 = 90
        let out = amount_out(100, 1000, 1000, 0).unwrap();
        assert_eq!(out, 90);
    }

    #[test]
    fn fee_reduces_output() {
        let free = amount_out(100, 1000, 1000, 0).unwrap();
        let taxed = amount_out(100, 1000, 1000, 300).unwrap();
        assert!(taxed < free);
    }

    #[test]
    fn full_fee_admits_no_output() {
        assert_eq!(amount_out(100, 1000, 1000, 10_000).unwrap(), 0);
    }

    #[test]
    fn output_never_drains_reserve() {
        // Even an absurdly large input leaves the output reserve positive.
        let out = amount_out(u64::MAX / 2, 1_000, 1_000, 0).unwrap();
        assert!(out < 1_000);
    }

    #[test]
    fn empty_pool_rejected() {
        assert!(amount_out(100, 0, 1000, 0).is_err());
        assert!(amount_out(100, 1000, 0, 0).is_err());
        assert!(amount_out(0, 1000, 1000, 0).is_err());
    }

    #[test]
    fn reserves_after_tracks_direction() {
        let (r0, r1) = reserves_after(1000, 1000, 100, 90, true).unwrap();
        assert_eq!((r0, r1), (1100, 910));

        let (r0, r1) = reserves_after(1000, 1000, 100, 90, false).unwrap();
        assert_eq!((r0, r1), (910, 1100));
    }
}
