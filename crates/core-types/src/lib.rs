//! # Tradelog Core Types
//!
//! The record shapes every other crate agrees on: logged trades, cash moves
//! and the filter used to pick a subset of trades for analysis. This crate has
//! no knowledge of storage or presentation.

pub mod enums;
pub mod error;
pub mod filter;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{TradeOutcome, TradeSide};
pub use error::CoreError;
pub use filter::TradeFilter;
pub use structs::{CashMove, Trade, new_record_id, parse_date};
