//! Prediction Market Registry
//!
//! Each market represents a single yes/no prediction. The hook engine only
//! reads the narrow registry interface: the resolved flag and the close time.

use anchor_lang::prelude::*;

/// Individual prediction market account
///
/// Seeds: ["market", market_id.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct Market {
    /// Unique market identifier
    pub id: u64,

    /// Market creator's address
    pub creator: Pubkey,

    /// The prediction question
    /// Example: "Will ETH flip BTC by market cap in 2025?"
    #[max_len(256)]
    pub question: String,

    /// Unix timestamp when trading ends
    pub close_time: i64,

    /// Unix timestamp when market was created
    pub created_at: i64,

    /// YES token mint address
    pub yes_mint: Pubkey,

    /// NO token mint address
    pub no_mint: Pubkey,

    /// Collateral token mint address
    pub collateral_mint: Pubkey,

    /// Whether an oracle has settled this market
    pub resolved: bool,

    /// Winning outcome (only valid after resolution)
    pub outcome: Outcome,

    /// PDA bump seed
    pub bump: u8,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";

    /// Outcome identifier of the YES side.
    pub fn yes_outcome_id(&self) -> u64 {
        self.id << 1
    }

    /// Outcome identifier of the NO side.
    pub fn no_outcome_id(&self) -> u64 {
        (self.id << 1) | 1
    }
}

/// Map an outcome identifier to its paired opposite. YES and NO identifiers
/// of one market differ only in the low bit.
pub fn paired_outcome_id(outcome_id: u64) -> u64 {
    outcome_id ^ 1
}

/// Prediction outcome
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum Outcome {
    /// Not yet determined
    #[default]
    Undetermined,
    /// YES outcome occurred
    Yes,
    /// NO outcome occurred
    No,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_ids_pair_up() {
        let market = Market {
            id: 7,
            creator: Pubkey::new_unique(),
            question: String::new(),
            close_time: 0,
            created_at: 0,
            yes_mint: Pubkey::new_unique(),
            no_mint: Pubkey::new_unique(),
            collateral_mint: Pubkey::new_unique(),
            resolved: false,
            outcome: Outcome::Undetermined,
            bump: 255,
        };

        assert_eq!(paired_outcome_id(market.yes_outcome_id()), market.no_outcome_id());
        assert_eq!(paired_outcome_id(market.no_outcome_id()), market.yes_outcome_id());
        assert_ne!(market.yes_outcome_id(), market.no_outcome_id());
    }
}
