use crate::error::AnalyticsError;
use crate::pnl::{checked_add, trade_pnl, validate_trades};
use chrono::NaiveDate;
use core_types::Trade;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sums trade P&L per calendar day, for heatmap-style display.
///
/// A day is present only if at least one trade happened on it, even when its
/// trades net out to exactly zero. Cash moves never enter this aggregation.
pub fn daily_pnl(trades: &[Trade]) -> Result<BTreeMap<NaiveDate, Decimal>, AnalyticsError> {
    validate_trades(trades)?;

    let mut days: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for trade in trades {
        let day = days.entry(trade.date).or_insert(Decimal::ZERO);
        *day = checked_add(*day, trade_pnl(trade), "daily_pnl")?;
    }

    tracing::debug!(trades = trades.len(), days = days.len(), "Aggregated daily P&L");
    Ok(days)
}
