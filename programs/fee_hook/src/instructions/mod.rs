//! Instruction handlers for the hook protocol
//!
//! Each instruction represents an action a caller can take:
//! - `initialize` - Set up the protocol (once)
//! - `configure` - Default and per-market fee configuration (owner only)
//! - `admin` - Ownership transfer, emergency lamport withdrawal
//! - `create_market` - Create a market registry entry
//! - `register` - Bind a market to its pool and activate the engine
//! - `liquidity` - Fund or drain a pool (exempt from the trade gate)
//! - `swap` - Trade outcome tokens through the hook callbacks
//! - `resolve` - Settle a market (oracle only)
//! - `views` - Read-only fee/status/volatility/impact queries

pub mod admin;
pub mod configure;
pub mod create_market;
pub mod initialize;
pub mod liquidity;
pub mod register;
pub mod resolve;
pub mod swap;
pub mod views;

pub use admin::*;
pub use configure::*;
pub use create_market::*;
pub use initialize::*;
pub use liquidity::*;
pub use register::*;
pub use resolve::*;
pub use swap::*;
pub use views::*;
