use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The summary statistics of a set of trades.
///
/// This struct is the output of the `AnalyticsEngine` and is rendered by callers
/// as summary cards. `None` means "insufficient data", never a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecordMetrics {
    // I. Profitability
    pub net_pnl: Decimal,
    pub gross_profit: Decimal,
    /// Magnitude of the summed losers, always >= 0.
    pub gross_loss: Decimal,
    pub profit_factor: Option<Decimal>, // None unless both winners and losers exist

    // II. Risk
    pub max_drawdown: Decimal,
    pub risk_reward: Option<Decimal>,

    // III. Trade-Level Statistics
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percentage in `0..=100`.
    pub win_rate: Decimal,
    pub average_win: Option<Decimal>,
    /// Negative when present.
    pub average_loss: Option<Decimal>,
}

impl TrackRecordMetrics {
    /// The metrics of an empty trade set: zeros and `None`s.
    pub fn new() -> Self {
        Self {
            net_pnl: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            profit_factor: None,
            max_drawdown: Decimal::ZERO,
            risk_reward: None,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate: Decimal::ZERO,
            average_win: None,
            average_loss: None,
        }
    }
}

impl Default for TrackRecordMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Account-level totals, where cash moves do count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub total_deposits: Decimal,
    pub net_pnl: Decimal,
    /// `total_deposits + net_pnl`.
    pub net_capital: Decimal,
}
