//! State structures for the prediction market hook protocol

pub mod config;
pub mod hook;
pub mod market;
pub mod pool;

pub use config::*;
pub use hook::*;
pub use market::*;
pub use pool::*;
