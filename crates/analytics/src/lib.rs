//! # Tradelog Analytics Engine
//!
//! This crate turns a journal of logged trades and cash moves into performance
//! statistics. It is the only part of the system with algorithmic content.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of storage,
//!   presentation or any external system. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every entry point takes an immutable snapshot and
//!   returns a freshly allocated result. There is no cache and no cross-call state,
//!   so callers simply re-invoke it after each change to the record set.
//!
//! ## Public API
//!
//! - `trade_pnl`: signed P&L of a single trade.
//! - `build_equity_curve`: chronological cumulative equity over trades and cash moves.
//! - `daily_pnl`: trade P&L bucketed by calendar day.
//! - `AnalyticsEngine`: summary statistics (`TrackRecordMetrics`) and account totals.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

pub mod daily;
pub mod engine;
pub mod equity;
pub mod error;
pub mod pnl;
pub mod report;

pub use daily::daily_pnl;
pub use engine::AnalyticsEngine;
pub use equity::{EquityPoint, build_equity_curve};
pub use error::AnalyticsError;
pub use pnl::trade_pnl;
pub use report::{AccountSummary, TrackRecordMetrics};
