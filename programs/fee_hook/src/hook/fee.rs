//! Fee Curve Engine
//!
//! Combines the bootstrap-decay, skew, asymmetric, and volatility fee
//! components into a single basis-points fee, clamped to the configured cap
//! and overridden by the close-window policy. The pool's lifecycle phase is
//! never stored; it is derived from time by one pure function so the whole
//! fee calculation stays deterministic and unit-testable.

use crate::hook::history::VolatilityEstimate;
use crate::hook::{FEE_SENTINEL_BPS, NEUTRAL_PROBABILITY_BPS};
use crate::state::config::{CloseWindowMode, DecayShape, FeeConfig, BPS_DENOM};

/// Lifecycle phase of a registered pool, derived from time.
///
/// Unregistered pools never reach this enum; the dispatcher rejects trades
/// on them and the read-only views report the sentinel directly.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MarketPhase {
    Bootstrapping,
    Steady,
    CloseWindow,
    Closed,
}

/// Derive the pool's phase. Closed wins over everything; the close window
/// wins over bootstrap when the two overlap.
pub fn market_phase(
    now: i64,
    bootstrap_start: i64,
    bootstrap_window_secs: u32,
    close_time: i64,
    close_window_secs: u32,
    resolved: bool,
) -> MarketPhase {
    if resolved || now >= close_time {
        return MarketPhase::Closed;
    }
    if close_time - now < close_window_secs as i64 {
        return MarketPhase::CloseWindow;
    }
    if now < bootstrap_start.saturating_add(bootstrap_window_secs as i64) {
        return MarketPhase::Bootstrapping;
    }
    MarketPhase::Steady
}

/// Whether the pool accepts trades in this phase under this configuration.
pub fn is_open(phase: MarketPhase, cfg: &FeeConfig) -> bool {
    match phase {
        MarketPhase::Closed => false,
        MarketPhase::CloseWindow => cfg.close_window_mode != CloseWindowMode::Halt,
        MarketPhase::Bootstrapping | MarketPhase::Steady => true,
    }
}

/// The fee charged for a trade right now, or the sentinel when the pool is
/// halted. Always within `[0, fee_cap_bps]` for an open pool.
pub fn current_fee_bps(
    cfg: &FeeConfig,
    phase: MarketPhase,
    now: i64,
    bootstrap_start: i64,
    probability_bps: u16,
    vol: VolatilityEstimate,
) -> u16 {
    match phase {
        MarketPhase::Closed => FEE_SENTINEL_BPS,
        MarketPhase::CloseWindow => match cfg.close_window_mode {
            CloseWindowMode::Halt => FEE_SENTINEL_BPS,
            CloseWindowMode::Fixed => cfg.close_window_fee_bps.min(cfg.fee_cap_bps),
            CloseWindowMode::Minimum => cfg.min_fee_bps,
            CloseWindowMode::Dynamic => component_fee(cfg, now, bootstrap_start, probability_bps, vol),
        },
        MarketPhase::Bootstrapping | MarketPhase::Steady => {
            component_fee(cfg, now, bootstrap_start, probability_bps, vol)
        }
    }
}

/// Sum of every enabled component, clamped to the cap.
fn component_fee(
    cfg: &FeeConfig,
    now: i64,
    bootstrap_start: i64,
    probability_bps: u16,
    vol: VolatilityEstimate,
) -> u16 {
    let mut total: u32 = 0;
    if cfg.bootstrap_fee_enabled {
        total += bootstrap_fee(cfg, now, bootstrap_start) as u32;
    }
    if cfg.skew_fee_enabled {
        total += skew_fee(cfg, probability_bps) as u32;
    }
    if cfg.asymmetric_fee_enabled {
        total += asymmetric_fee(cfg, probability_bps) as u32;
    }
    if cfg.volatility_fee_enabled {
        total += volatility_fee(cfg, vol) as u32;
    }
    total.min(cfg.fee_cap_bps as u32) as u16
}

/// Bootstrap component: `max - (max - min) * d(p)` where `p` is the elapsed
/// share of the bootstrap window and `d` the configured decay shape.
pub fn bootstrap_fee(cfg: &FeeConfig, now: i64, bootstrap_start: i64) -> u16 {
    let elapsed = now.saturating_sub(bootstrap_start).max(0) as u64;
    let progress_bps = if cfg.bootstrap_window_secs == 0 {
        BPS_DENOM as u64
    } else {
        (elapsed * BPS_DENOM as u64 / cfg.bootstrap_window_secs as u64).min(BPS_DENOM as u64)
    };
    let d = decay(cfg.decay_shape, progress_bps as u16);
    let span = (cfg.max_fee_bps - cfg.min_fee_bps) as u64;
    cfg.max_fee_bps - (span * d as u64 / BPS_DENOM as u64) as u16
}

/// Decay shape `d(p)` on the fixed-point interval `[0, 10000]`. Every shape
/// maps 0 to 0 and 10000 to 10000 and is monotone in between.
pub fn decay(shape: DecayShape, progress_bps: u16) -> u16 {
    let p = progress_bps.min(BPS_DENOM) as u128;
    let q = BPS_DENOM as u128 - p;
    match shape {
        DecayShape::Linear => p as u16,
        DecayShape::CubicComplement => {
            // 1 - (1-p)^3
            (BPS_DENOM as u128 - q * q * q / (BPS_DENOM as u128 * BPS_DENOM as u128)) as u16
        }
        DecayShape::Sqrt => isqrt(p * BPS_DENOM as u128) as u16,
        DecayShape::SqrtComplement => (BPS_DENOM as u128 - isqrt(q * BPS_DENOM as u128)) as u16,
    }
}

/// Skew component: the deviation from the midpoint, normalized against
/// `skew_ref_bps`, raised to the configured exponent.
pub fn skew_fee(cfg: &FeeConfig, probability_bps: u16) -> u16 {
    let dev = probability_bps.abs_diff(NEUTRAL_PROBABILITY_BPS) as u128;
    let ratio = (dev * BPS_DENOM as u128 / cfg.skew_ref_bps as u128).min(BPS_DENOM as u128);
    let e = cfg.skew_curve.exponent();
    let num = ratio.pow(e);
    let denom = (BPS_DENOM as u128).pow(e);
    (cfg.max_skew_fee_bps as u128 * num / denom) as u16
}

/// Asymmetric component: linear in the deviation, always normalized against
/// the fixed midpoint range rather than `skew_ref_bps`.
pub fn asymmetric_fee(cfg: &FeeConfig, probability_bps: u16) -> u16 {
    let dev = probability_bps.abs_diff(NEUTRAL_PROBABILITY_BPS) as u32;
    (cfg.asymmetric_fee_bps as u32 * dev / NEUTRAL_PROBABILITY_BPS as u32) as u16
}

/// Volatility component: scales with the dispersion percentage, saturating
/// at the configured maximum. An empty estimate contributes nothing.
pub fn volatility_fee(cfg: &FeeConfig, vol: VolatilityEstimate) -> u16 {
    if vol.samples == 0 {
        return 0;
    }
    let scaled = cfg.volatility_fee_bps as u64 * vol.dispersion_pct / 100;
    scaled.min(cfg.volatility_fee_bps as u64) as u16
}

/// Integer square root using Newton's method
///
/// Computes floor(√x) for any non-negative integer.
pub fn isqrt(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }
    let mut z = (x + 1) / 2;
    let mut y = x;
    while z < y {
        y = z;
        z = (x / z + z) / 2;
    }
    y
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::config::SkewCurve;

    const DAY: i64 = 86_400;

    fn cfg() -> FeeConfig {
        FeeConfig::sensible_default()
    }

    fn no_vol() -> VolatilityEstimate {
        VolatilityEstimate::default()
    }

    #[test]
    fn isqrt_basics() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(9), 3);
        assert_eq!(isqrt(10), 3);
        assert_eq!(isqrt(100_000_000), 10_000);
    }

    #[test]
    fn phase_progression_over_time() {
        let close = 10 * DAY;
        // Registration at t=0, two-day bootstrap, one-hour close window.
        let phase = |now| market_phase(now, 0, 2 * DAY as u32, close, 3600, false);

        assert_eq!(phase(0), MarketPhase::Bootstrapping);
        assert_eq!(phase(2 * DAY - 1), MarketPhase::Bootstrapping);
        assert_eq!(phase(2 * DAY), MarketPhase::Steady);
        assert_eq!(phase(close - 3601), MarketPhase::Steady);
        assert_eq!(phase(close - 3600), MarketPhase::CloseWindow);
        assert_eq!(phase(close - 1), MarketPhase::CloseWindow);
        assert_eq!(phase(close), MarketPhase::Closed);
    }

    #[test]
    fn resolution_closes_early() {
        assert_eq!(
            market_phase(0, 0, 1000, 10 * DAY, 3600, true),
            MarketPhase::Closed
        );
    }

    #[test]
    fn close_window_beats_bootstrap_on_overlap() {
        // Bootstrap window longer than the market's whole life.
        assert_eq!(
            market_phase(99, 0, 1_000_000, 100, 50, false),
            MarketPhase::CloseWindow
        );
    }

    #[test]
    fn zero_close_window_never_enters_close_phase() {
        assert_eq!(
            market_phase(10 * DAY - 1, 0, 100, 10 * DAY, 0, false),
            MarketPhase::Steady
        );
    }

    #[test]
    fn decay_endpoints_are_exact_for_every_shape() {
        for shape in [
            DecayShape::Linear,
            DecayShape::CubicComplement,
            DecayShape::Sqrt,
            DecayShape::SqrtComplement,
        ] {
            assert_eq!(decay(shape, 0), 0, "{shape:?}");
            assert_eq!(decay(shape, 10_000), 10_000, "{shape:?}");
        }
    }

    #[test]
    fn decay_is_monotone_for_every_shape() {
        for shape in [
            DecayShape::Linear,
            DecayShape::CubicComplement,
            DecayShape::Sqrt,
            DecayShape::SqrtComplement,
        ] {
            let mut prev = 0;
            for p in (0..=10_000u16).step_by(250) {
                let d = decay(shape, p);
                assert!(d >= prev, "{shape:?} fell at p={p}");
                prev = d;
            }
        }
    }

    #[test]
    fn decay_families_order_around_linear() {
        // At the halfway point: the two complement shapes and sqrt sit on
        // known sides of the linear reference.
        let p = 5_000;
        let lin = decay(DecayShape::Linear, p);
        assert!(decay(DecayShape::CubicComplement, p) > lin);
        assert!(decay(DecayShape::Sqrt, p) > lin);
        assert!(decay(DecayShape::SqrtComplement, p) < lin);
    }

    #[test]
    fn bootstrap_fee_spans_max_to_min() {
        let c = cfg();
        assert_eq!(bootstrap_fee(&c, 0, 0), c.max_fee_bps);
        assert_eq!(
            bootstrap_fee(&c, c.bootstrap_window_secs as i64, 0),
            c.min_fee_bps
        );
        // Stays at the floor afterwards.
        assert_eq!(bootstrap_fee(&c, 10 * DAY, 0), c.min_fee_bps);
    }

    #[test]
    fn bootstrap_fee_is_monotone_non_increasing() {
        let c = cfg();
        let mut prev = u16::MAX;
        for t in (0..=c.bootstrap_window_secs as i64).step_by(3600) {
            let f = bootstrap_fee(&c, t, 0);
            assert!(f <= prev, "fee rose at t={t}");
            prev = f;
        }
    }

    #[test]
    fn skew_fee_zero_at_midpoint_and_monotone() {
        let c = cfg();
        assert_eq!(skew_fee(&c, 5000), 0);
        let mut prev = 0;
        for p in (5000..=10_000u16).step_by(500) {
            let f = skew_fee(&c, p);
            assert!(f >= prev, "skew fee fell at p={p}");
            prev = f;
        }
        // Symmetric around the midpoint.
        assert_eq!(skew_fee(&c, 3000), skew_fee(&c, 7000));
    }

    #[test]
    fn skew_fee_saturates_at_reference() {
        let c = cfg();
        // dev >= skew_ref -> full skew fee.
        assert_eq!(skew_fee(&c, 9000), c.max_skew_fee_bps);
        assert_eq!(skew_fee(&c, 9999), c.max_skew_fee_bps);
    }

    #[test]
    fn quadratic_skew_matches_reference_values() {
        let c = cfg(); // ref 4000, max 80, quadratic
        // dev 2000 -> ratio 1/2 -> 80 * 1/4 = 20
        assert_eq!(skew_fee(&c, 7000), 20);
        // dev 1000 -> ratio 1/4 -> 80 / 16 = 5
        assert_eq!(skew_fee(&c, 6000), 5);
    }

    #[test]
    fn higher_exponents_flatten_small_deviations() {
        let mut c = cfg();
        let dev = 6000; // quarter of the reference
        let mut prev = u16::MAX;
        for curve in [
            SkewCurve::Linear,
            SkewCurve::Quadratic,
            SkewCurve::Cubic,
            SkewCurve::Quartic,
        ] {
            c.skew_curve = curve;
            let f = skew_fee(&c, dev);
            assert!(f <= prev, "{curve:?}");
            prev = f;
        }
    }

    #[test]
    fn asymmetric_fee_is_linear_in_deviation() {
        let c = cfg(); // 20 bps max
        assert_eq!(asymmetric_fee(&c, 5000), 0);
        assert_eq!(asymmetric_fee(&c, 7500), 10);
        assert_eq!(asymmetric_fee(&c, 10_000), 20);
        assert_eq!(asymmetric_fee(&c, 0), 20);
    }

    #[test]
    fn volatility_fee_scales_and_saturates() {
        let c = cfg(); // 50 bps max
        assert_eq!(volatility_fee(&c, VolatilityEstimate::default()), 0);
        let est = VolatilityEstimate {
            dispersion_pct: 20,
            samples: 5,
            mean_bps: 5000,
        };
        assert_eq!(volatility_fee(&c, est), 10);
        let wild = VolatilityEstimate {
            dispersion_pct: 400,
            samples: 5,
            mean_bps: 5000,
        };
        assert_eq!(volatility_fee(&c, wild), c.volatility_fee_bps);
    }

    #[test]
    fn closed_phase_reports_sentinel() {
        let c = cfg();
        assert_eq!(
            current_fee_bps(&c, MarketPhase::Closed, 0, 0, 5000, no_vol()),
            FEE_SENTINEL_BPS
        );
        assert!(!is_open(MarketPhase::Closed, &c));
    }

    #[test]
    fn close_window_modes() {
        let mut c = cfg();

        c.close_window_mode = CloseWindowMode::Halt;
        assert_eq!(
            current_fee_bps(&c, MarketPhase::CloseWindow, 0, 0, 5000, no_vol()),
            FEE_SENTINEL_BPS
        );
        assert!(!is_open(MarketPhase::CloseWindow, &c));

        c.close_window_mode = CloseWindowMode::Fixed;
        c.close_window_fee_bps = 500;
        assert_eq!(
            current_fee_bps(&c, MarketPhase::CloseWindow, 0, 0, 5000, no_vol()),
            c.fee_cap_bps
        );
        c.close_window_fee_bps = 40;
        assert_eq!(
            current_fee_bps(&c, MarketPhase::CloseWindow, 0, 0, 5000, no_vol()),
            40
        );
        assert!(is_open(MarketPhase::CloseWindow, &c));

        c.close_window_mode = CloseWindowMode::Minimum;
        assert_eq!(
            current_fee_bps(&c, MarketPhase::CloseWindow, 0, 0, 5000, no_vol()),
            c.min_fee_bps
        );

        c.close_window_mode = CloseWindowMode::Dynamic;
        let dynamic = current_fee_bps(&c, MarketPhase::CloseWindow, 0, 0, 5000, no_vol());
        let steady = current_fee_bps(&c, MarketPhase::Steady, 0, 0, 5000, no_vol());
        assert_eq!(dynamic, steady);
    }

    #[test]
    fn fee_respects_cap_everywhere() {
        let mut c = cfg();
        c.volatility_fee_enabled = true;
        let hot = VolatilityEstimate {
            dispersion_pct: 500,
            samples: 10,
            mean_bps: 5000,
        };
        for now in [0, DAY, 2 * DAY, 30 * DAY] {
            for p in (0..=10_000u16).step_by(1000) {
                let fee = current_fee_bps(&c, MarketPhase::Bootstrapping, now, 0, p, hot);
                assert!(fee <= c.fee_cap_bps, "fee {fee} above cap at t={now} p={p}");
            }
        }
    }

    #[test]
    fn disabled_components_contribute_nothing() {
        let mut c = cfg();
        c.bootstrap_fee_enabled = false;
        c.skew_fee_enabled = false;
        c.asymmetric_fee_enabled = false;
        c.volatility_fee_enabled = false;
        assert_eq!(
            current_fee_bps(&c, MarketPhase::Steady, 0, 0, 9000, no_vol()),
            0
        );
    }
}
