//! Global Protocol Configuration
//!
//! The singleton config account holds the protocol roles and the default fee
//! configuration applied to every registered pool that has no override.

use anchor_lang::prelude::*;

use crate::hook::HookError;

/// Basis-points denominator.
pub const BPS_DENOM: u16 = 10_000;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["config"]
#[account]
#[derive(InitSpace)]
pub struct HookConfig {
    /// Protocol owner with configuration privileges
    pub owner: Pubkey,

    /// Account allowed to register markets besides the owner
    pub registrar: Pubkey,

    /// Oracle address authorized to resolve markets
    pub oracle: Pubkey,

    /// Collateral token mint (e.g., USDC)
    pub collateral_mint: Pubkey,

    /// Total markets created (used as incrementing ID)
    pub market_count: u64,

    /// Fee configuration applied to pools without a per-market override
    pub default_fees: FeeConfig,

    /// PDA bump seed
    pub bump: u8,
}

impl HookConfig {
    pub const SEED: &'static [u8] = b"config";
}

/// Per-market fee configuration override
///
/// Seeds: ["market_fees", market]
#[account]
#[derive(InitSpace)]
pub struct MarketFeeConfig {
    /// Market this override applies to
    pub market: Pubkey,

    /// Overriding fee configuration
    pub fees: FeeConfig,

    /// PDA bump seed
    pub bump: u8,
}

impl MarketFeeConfig {
    pub const SEED: &'static [u8] = b"market_fees";
}

/// Selects what fee policy applies inside the close window.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CloseWindowMode {
    /// Trading is halted: the fee query returns the sentinel.
    #[default]
    Halt,
    /// A fixed fee, capped at `fee_cap_bps`. Must be non-zero.
    Fixed,
    /// The configured minimum fee.
    Minimum,
    /// Fall through to the normal component calculation.
    Dynamic,
}

/// Bootstrap decay curve family, `d: [0,1] -> [0,1]` with `d(0)=0, d(1)=1`.
///
/// Named after the formulas rather than their perceived pacing; all four are
/// monotone non-decreasing in elapsed time.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DecayShape {
    /// d(p) = p
    #[default]
    Linear,
    /// d(p) = 1 - (1 - p)^3
    CubicComplement,
    /// d(p) = sqrt(p)
    Sqrt,
    /// d(p) = 1 - sqrt(1 - p)
    SqrtComplement,
}

/// Exponent applied to the normalized skew deviation.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SkewCurve {
    Linear,
    #[default]
    Quadratic,
    Cubic,
    Quartic,
}

impl SkewCurve {
    pub fn exponent(&self) -> u32 {
        match self {
            SkewCurve::Linear => 1,
            SkewCurve::Quadratic => 2,
            SkewCurve::Cubic => 3,
            SkewCurve::Quartic => 4,
        }
    }
}

/// A complete fee/risk configuration. Either the protocol default or a
/// per-market override; validated as a whole on every write.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug)]
pub struct FeeConfig {
    /// Steady-state floor fee
    pub min_fee_bps: u16,
    /// Fee at the start of the bootstrap window
    pub max_fee_bps: u16,
    /// Maximum skew component
    pub max_skew_fee_bps: u16,
    /// Hard cap on the combined fee
    pub fee_cap_bps: u16,
    /// Skew deviation that yields the full skew fee
    pub skew_ref_bps: u16,
    /// Maximum asymmetric component, scaled against the 5000 midpoint
    pub asymmetric_fee_bps: u16,
    /// Maximum volatility component
    pub volatility_fee_bps: u16,
    /// Fee used by `CloseWindowMode::Fixed`
    pub close_window_fee_bps: u16,
    /// Maximum allowed probability shift per trade
    pub max_price_impact_bps: u16,
    /// Duration of the bootstrap decay, seconds
    pub bootstrap_window_secs: u32,
    /// Duration of the close window, seconds (0 disables it)
    pub close_window_secs: u32,
    /// Snapshot staleness horizon for volatility, seconds (0 = unlimited)
    pub volatility_window_secs: u32,
    pub bootstrap_fee_enabled: bool,
    pub skew_fee_enabled: bool,
    pub asymmetric_fee_enabled: bool,
    pub volatility_fee_enabled: bool,
    pub impact_guard_enabled: bool,
    pub close_window_mode: CloseWindowMode,
    pub decay_shape: DecayShape,
    pub skew_curve: SkewCurve,
}

impl FeeConfig {
    /// Production defaults: 0.75% decaying to 0.10% over two days, quadratic
    /// skew up to 0.80% at a 90/10 book, 0.20% asymmetric, 3% cap, 12% max
    /// price impact, trading halted in the final hour.
    pub fn sensible_default() -> Self {
        Self {
            min_fee_bps: 10,
            max_fee_bps: 75,
            max_skew_fee_bps: 80,
            fee_cap_bps: 300,
            skew_ref_bps: 4000,
            asymmetric_fee_bps: 20,
            volatility_fee_bps: 50,
            close_window_fee_bps: 0,
            max_price_impact_bps: 1200,
            bootstrap_window_secs: 2 * 24 * 3600,
            close_window_secs: 3600,
            volatility_window_secs: 24 * 3600,
            bootstrap_fee_enabled: true,
            skew_fee_enabled: true,
            asymmetric_fee_enabled: true,
            volatility_fee_enabled: false,
            impact_guard_enabled: true,
            close_window_mode: CloseWindowMode::Halt,
            decay_shape: DecayShape::Linear,
            skew_curve: SkewCurve::Quadratic,
        }
    }

    /// Validate the configuration as a whole. Any violation rejects the
    /// entire write with `InvalidConfig`.
    pub fn validate(&self) -> Result<()> {
        require!(self.min_fee_bps <= self.max_fee_bps, HookError::InvalidConfig);
        require!(self.fee_cap_bps >= self.min_fee_bps, HookError::InvalidConfig);
        require!(self.fee_cap_bps < BPS_DENOM, HookError::InvalidConfig);

        // The cap must leave room for every component at its configured
        // maximum, whether or not the component is currently enabled.
        let component_sum = self.max_fee_bps as u32
            + self.max_skew_fee_bps as u32
            + self.asymmetric_fee_bps as u32
            + self.volatility_fee_bps as u32;
        require!(self.fee_cap_bps as u32 >= component_sum, HookError::InvalidConfig);

        require!(self.skew_ref_bps > 0, HookError::InvalidConfig);
        require!(self.skew_ref_bps <= 5000, HookError::InvalidConfig);
        require!(self.asymmetric_fee_bps <= BPS_DENOM, HookError::InvalidConfig);
        require!(self.volatility_fee_bps <= BPS_DENOM, HookError::InvalidConfig);

        if self.close_window_mode == CloseWindowMode::Fixed {
            require!(self.close_window_fee_bps != 0, HookError::InvalidConfig);
        }

        Ok(())
    }
}

/// Resolve the fee configuration in effect for a market: the override if one
/// exists, otherwise the protocol default.
pub fn effective_fees(config: &HookConfig, market_override: Option<&MarketFeeConfig>) -> FeeConfig {
    match market_override {
        Some(o) => o.fees,
        None => config.default_fees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(cfg: FeeConfig) {
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("InvalidConfig"), "{err}");
    }

    #[test]
    fn default_config_is_valid() {
        FeeConfig::sensible_default().validate().unwrap();
    }

    #[test]
    fn min_above_max_rejected() {
        let mut cfg = FeeConfig::sensible_default();
        cfg.min_fee_bps = cfg.max_fee_bps + 1;
        assert_invalid(cfg);
    }

    #[test]
    fn cap_at_full_range_rejected() {
        let mut cfg = FeeConfig::sensible_default();
        cfg.fee_cap_bps = 10_000;
        assert_invalid(cfg);
    }

    #[test]
    fn cap_below_component_sum_rejected() {
        let mut cfg = FeeConfig::sensible_default();
        cfg.fee_cap_bps = cfg.max_fee_bps + cfg.max_skew_fee_bps; // misses asym + vol
        assert_invalid(cfg);
    }

    #[test]
    fn cap_below_min_rejected() {
        let mut cfg = FeeConfig::sensible_default();
        cfg.min_fee_bps = 1;
        cfg.max_fee_bps = 1;
        cfg.max_skew_fee_bps = 0;
        cfg.asymmetric_fee_bps = 0;
        cfg.volatility_fee_bps = 0;
        cfg.fee_cap_bps = 0;
        assert_invalid(cfg);
    }

    #[test]
    fn skew_ref_bounds_enforced() {
        let mut cfg = FeeConfig::sensible_default();
        cfg.skew_ref_bps = 0;
        assert_invalid(cfg);

        let mut cfg = FeeConfig::sensible_default();
        cfg.skew_ref_bps = 5001;
        assert_invalid(cfg);

        let mut cfg = FeeConfig::sensible_default();
        cfg.skew_ref_bps = 5000;
        cfg.validate().unwrap();
    }

    #[test]
    fn fixed_close_mode_requires_nonzero_fee() {
        let mut cfg = FeeConfig::sensible_default();
        cfg.close_window_mode = CloseWindowMode::Fixed;
        cfg.close_window_fee_bps = 0;
        assert_invalid(cfg);

        cfg.close_window_fee_bps = 25;
        cfg.validate().unwrap();
    }

    #[test]
    fn override_takes_precedence_over_default() {
        let default = FeeConfig::sensible_default();
        let mut special = default;
        special.min_fee_bps = 5;

        let config = HookConfig {
            owner: Pubkey::new_unique(),
            registrar: Pubkey::new_unique(),
            oracle: Pubkey::new_unique(),
            collateral_mint: Pubkey::new_unique(),
            market_count: 0,
            default_fees: default,
            bump: 255,
        };
        let market_cfg = MarketFeeConfig {
            market: Pubkey::new_unique(),
            fees: special,
            bump: 255,
        };

        assert_eq!(effective_fees(&config, None), default);
        assert_eq!(effective_fees(&config, Some(&market_cfg)), special);
    }
}
