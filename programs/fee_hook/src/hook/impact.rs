//! Price-Impact Guard
//!
//! The guard captures reserves before a trade and, once the trade has been
//! applied, reconstructs the actual deltas from a fresh read to bound how
//! far a single trade may move the implied probability. The same math also
//! powers the read-only impact simulation.

use anchor_lang::prelude::*;

use crate::amm::constant_product;
use crate::hook::{probability_bps, probability_shift_bps, HookError, FEE_SENTINEL_BPS};
use crate::state::config::BPS_DENOM;

/// Probability shift a hypothetical trade would cause, in bps.
///
/// The sentinel fee passes through unchanged ("do not trade" simulates to
/// "do not trade"), and a 100% fee admits no output, hence no shift.
pub fn simulate_price_impact(
    reserve0: u64,
    reserve1: u64,
    yes_is_token0: bool,
    amount_in: u64,
    zero_for_one: bool,
    fee_bps: u16,
) -> Result<u16> {
    if fee_bps == FEE_SENTINEL_BPS {
        return Ok(FEE_SENTINEL_BPS);
    }
    if fee_bps >= BPS_DENOM {
        return Ok(0);
    }

    let (reserve_in, reserve_out) = if zero_for_one {
        (reserve0, reserve1)
    } else {
        (reserve1, reserve0)
    };
    let out = constant_product::amount_out(amount_in, reserve_in, reserve_out, fee_bps)?;
    let after = constant_product::reserves_after(reserve0, reserve1, amount_in, out, zero_for_one)?;

    Ok(probability_shift_bps((reserve0, reserve1), after, yes_is_token0))
}

/// Enforce the configured impact limit against the reconstructed trade.
///
/// `pre` is the cached pre-trade snapshot, `post` a fresh read after the
/// trade was applied. Fails with `PriceImpactTooHigh` beyond the bound.
pub fn check_price_impact(
    pre: (u64, u64),
    post: (u64, u64),
    yes_is_token0: bool,
    max_price_impact_bps: u16,
) -> Result<()> {
    let delta0 = post.0 as i128 - pre.0 as i128;
    let delta1 = post.1 as i128 - pre.1 as i128;
    let shift = probability_shift_bps(pre, post, yes_is_token0);

    msg!(
        "impact check: d0={} d1={} shift={}bps (p {} -> {})",
        delta0,
        delta1,
        shift,
        probability_bps(pre.0, pre.1, yes_is_token0),
        probability_bps(post.0, post.1, yes_is_token0),
    );

    require!(shift <= max_price_impact_bps, HookError::PriceImpactTooHigh);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_passes_through() {
        assert_eq!(
            simulate_price_impact(500, 500, true, 100, true, FEE_SENTINEL_BPS).unwrap(),
            FEE_SENTINEL_BPS
        );
    }

    #[test]
    fn full_fee_simulates_to_zero_shift() {
        assert_eq!(
            simulate_price_impact(500, 500, true, 100, true, 10_000).unwrap(),
            0
        );
    }

    #[test]
    fn impact_grows_with_trade_size() {
        let small = simulate_price_impact(500, 500, true, 10, true, 10).unwrap();
        let large = simulate_price_impact(500, 500, true, 100, true, 10).unwrap();
        assert!(large > small);
        assert!(small > 0);
    }

    #[test]
    fn direction_moves_probability_opposite_ways() {
        // yes = token0. Swapping NO in (one_for_zero... zero_for_one=false)
        // adds to the NO reserve and drains YES, raising P(YES); the other
        // direction lowers it. The absolute shift is reported either way.
        let up = simulate_price_impact(500, 500, true, 100, false, 0).unwrap();
        let down = simulate_price_impact(500, 500, true, 100, true, 0).unwrap();
        assert!(up > 0 && down > 0);
    }

    #[test]
    fn guard_trips_beyond_limit() {
        // 500/500 -> 600/417 moves P(YES) from 5000 to 4100: 900 bps.
        let pre = (500u64, 500u64);
        let post = (600u64, 417u64);
        check_price_impact(pre, post, true, 1200).unwrap();
        let err = check_price_impact(pre, post, true, 800).unwrap_err();
        assert!(err.to_string().contains("PriceImpactTooHigh"), "{err}");
    }

    #[test]
    fn no_op_trade_always_passes() {
        check_price_impact((500, 500), (500, 500), true, 0).unwrap();
    }

    #[test]
    fn simulation_agrees_with_guard_reconstruction() {
        let (r0, r1) = (1_000u64, 1_000u64);
        let amount_in = 150;
        let fee = 30;
        let predicted = simulate_price_impact(r0, r1, true, amount_in, true, fee).unwrap();

        let out = constant_product::amount_out(amount_in, r0, r1, fee).unwrap();
        let post = constant_product::reserves_after(r0, r1, amount_in, out, true).unwrap();
        let actual = probability_shift_bps((r0, r1), post, true);
        assert_eq!(predicted, actual);
    }
}
