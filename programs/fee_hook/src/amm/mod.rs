//! # Automated Market Maker (AMM) Module
//!
//! Constant-product pricing for a market's YES/NO outcome tokens. The
//! implied YES probability falls out of the reserve ratio:
//!
//! ```text
//! P(YES) = NO / (YES + NO)
//! ```
//!
//! Buying YES removes YES tokens from the pool and adds NO tokens, which
//! raises P(YES); the hook engine measures exactly that shift for its
//! price-impact guard.

pub mod constant_product;

pub use constant_product::*;
