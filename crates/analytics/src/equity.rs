use crate::error::AnalyticsError;
use crate::pnl::{checked_add, trade_pnl, validate_trades};
use chrono::NaiveDate;
use core_types::{CashMove, Trade};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single point on the equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    /// Cumulative equity after this event.
    pub value: Decimal,
    /// The delta this single event contributed.
    pub pnl: Decimal,
}

/// Merges trades and cash moves into one chronological series of cumulative equity.
///
/// Events on the same date keep their concatenation order: every trade before
/// every cash move, each in its original list order. The returned series has
/// exactly `trades.len() + deposits.len()` points. A running total outside the
/// `Decimal` range is reported as `AnalyticsError::Overflow`.
pub fn build_equity_curve(
    trades: &[Trade],
    deposits: &[CashMove],
) -> Result<Vec<EquityPoint>, AnalyticsError> {
    validate_trades(trades)?;
    equity_curve_of(trades, deposits)
}

/// Builds the curve from an already validated snapshot.
pub(crate) fn equity_curve_of(
    trades: &[Trade],
    deposits: &[CashMove],
) -> Result<Vec<EquityPoint>, AnalyticsError> {
    let mut events: Vec<(NaiveDate, Decimal)> = trades
        .iter()
        .map(|t| (t.date, trade_pnl(t)))
        .chain(deposits.iter().map(|d| (d.date, d.amount)))
        .collect();

    // `sort_by_key` is stable, which gives the same-day tie-break.
    events.sort_by_key(|&(date, _)| date);

    let mut equity = Decimal::ZERO;
    let mut curve = Vec::with_capacity(events.len());
    for (date, delta) in events {
        equity = checked_add(equity, delta, "equity")?;
        curve.push(EquityPoint {
            date,
            value: equity,
            pnl: delta,
        });
    }
    Ok(curve)
}
