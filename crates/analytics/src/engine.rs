use crate::equity::equity_curve_of;
use crate::error::AnalyticsError;
use crate::pnl::{checked_add, checked_div, trade_pnl, validate_trades};
use crate::report::{AccountSummary, TrackRecordMetrics};
use core_types::{CashMove, Trade};
use rust_decimal::Decimal;

/// A stateless calculator for deriving performance metrics from a trade journal.
///
/// Holds no cache; callers re-invoke it whenever the record set changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating track record metrics.
    ///
    /// # Arguments
    ///
    /// * `trades` - The trades under analysis, already filtered by the caller.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `TrackRecordMetrics`, or an `AnalyticsError` if a
    /// trade breaks the record contract or a total or ratio leaves the `Decimal` range.
    pub fn calculate(&self, trades: &[Trade]) -> Result<TrackRecordMetrics, AnalyticsError> {
        let mut report = TrackRecordMetrics::new();

        if trades.is_empty() {
            return Ok(report);
        }

        validate_trades(trades)?;

        self.calculate_profitability(trades, &mut report)?;
        self.calculate_drawdown(trades, &mut report)?;

        tracing::debug!(
            trades = report.total_trades,
            net_pnl = %report.net_pnl,
            max_drawdown = %report.max_drawdown,
            "Calculated track record metrics"
        );

        Ok(report)
    }

    /// Totals deposits and trading P&L into the account's net capital.
    pub fn summarize_account(
        &self,
        trades: &[Trade],
        deposits: &[CashMove],
    ) -> Result<AccountSummary, AnalyticsError> {
        validate_trades(trades)?;

        let net_pnl = trades
            .iter()
            .try_fold(Decimal::ZERO, |acc, t| checked_add(acc, trade_pnl(t), "net_pnl"))?;
        let total_deposits = deposits
            .iter()
            .try_fold(Decimal::ZERO, |acc, d| checked_add(acc, d.amount, "total_deposits"))?;

        Ok(AccountSummary {
            total_deposits,
            net_pnl,
            net_capital: checked_add(total_deposits, net_pnl, "net_capital")?,
        })
    }

    /// Win/loss partitioning, averages and ratios.
    fn calculate_profitability(
        &self,
        trades: &[Trade],
        report: &mut TrackRecordMetrics,
    ) -> Result<(), AnalyticsError> {
        report.total_trades = trades.len();

        for pnl in trades.iter().map(trade_pnl) {
            report.net_pnl = checked_add(report.net_pnl, pnl, "net_pnl")?;

            // Zero-P&L trades land in neither bucket but still count toward total_trades.
            if pnl > Decimal::ZERO {
                report.gross_profit = checked_add(report.gross_profit, pnl, "gross_profit")?;
                report.winning_trades += 1;
            } else if pnl < Decimal::ZERO {
                report.gross_loss = checked_add(report.gross_loss, pnl.abs(), "gross_loss")?;
                report.losing_trades += 1;
            }
        }

        if report.winning_trades > 0 {
            report.average_win = Some(checked_div(
                report.gross_profit,
                Decimal::from(report.winning_trades),
                "average_win",
            )?);
        }

        if report.losing_trades > 0 {
            report.average_loss = Some(checked_div(
                -report.gross_loss,
                Decimal::from(report.losing_trades),
                "average_loss",
            )?);
        }

        // --- Ratios ---
        if report.winning_trades > 0 && report.losing_trades > 0 && !report.gross_loss.is_zero() {
            report.profit_factor = Some(checked_div(
                report.gross_profit,
                report.gross_loss,
                "profit_factor",
            )?);
        }

        if let (Some(avg_win), Some(avg_loss)) = (report.average_win, report.average_loss) {
            if !avg_loss.is_zero() {
                report.risk_reward = Some(checked_div(avg_win, avg_loss.abs(), "risk_reward")?);
            }
        }

        report.win_rate = Decimal::from(report.winning_trades) * Decimal::ONE_HUNDRED
            / Decimal::from(report.total_trades);

        Ok(())
    }

    /// Maximum retracement from any prior high of the trade-only equity curve.
    ///
    /// Cash moves are excluded: drawdown measures trading alone. The running peak
    /// starts at zero, so an opening loss already counts as drawdown.
    fn calculate_drawdown(
        &self,
        trades: &[Trade],
        report: &mut TrackRecordMetrics,
    ) -> Result<(), AnalyticsError> {
        let equity_curve = equity_curve_of(trades, &[])?;

        let mut peak_equity = Decimal::ZERO;
        let mut max_drawdown = Decimal::ZERO;

        for point in &equity_curve {
            if point.value > peak_equity {
                peak_equity = point.value;
            }
            let drawdown = peak_equity
                .checked_sub(point.value)
                .ok_or(AnalyticsError::Overflow("max_drawdown"))?;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }

        report.max_drawdown = max_drawdown;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::daily_pnl;
    use crate::equity::build_equity_curve;
    use chrono::NaiveDate;
    use core_types::{TradeOutcome, TradeSide, parse_date};
    use rust_decimal_macros::dec;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn win(id: &str, date: &str, amount: Decimal) -> Trade {
        Trade::new(id, day(date), "BTCUSDT", TradeSide::Long, TradeOutcome::Win, amount).unwrap()
    }

    fn loss(id: &str, date: &str, amount: Decimal) -> Trade {
        Trade::new(id, day(date), "BTCUSDT", TradeSide::Short, TradeOutcome::Loss, amount).unwrap()
    }

    #[test]
    fn test_empty_journal_gives_zeroed_metrics() {
        let metrics = AnalyticsEngine::new().calculate(&[]).unwrap();

        assert_eq!(metrics.net_pnl, dec!(0));
        assert_eq!(metrics.win_rate, dec!(0));
        assert_eq!(metrics.profit_factor, None);
        assert_eq!(metrics.risk_reward, None);
        assert_eq!(metrics.max_drawdown, dec!(0));
        assert_eq!(metrics.average_win, None);
        assert_eq!(metrics.average_loss, None);
        assert_eq!(metrics.total_trades, 0);
    }

    #[test]
    fn test_one_win_one_loss() {
        let trades = vec![
            win("1", "2024-01-01", dec!(200)),
            loss("2", "2024-01-02", dec!(100)),
        ];

        let metrics = AnalyticsEngine::new().calculate(&trades).unwrap();

        assert_eq!(metrics.net_pnl, dec!(100));
        assert_eq!(metrics.win_rate, dec!(50));
        assert_eq!(metrics.profit_factor, Some(dec!(2)));
        assert_eq!(metrics.average_win, Some(dec!(200)));
        assert_eq!(metrics.average_loss, Some(dec!(-100)));
        assert_eq!(metrics.risk_reward, Some(dec!(2)));
        assert_eq!(metrics.max_drawdown, dec!(100));

        let curve = build_equity_curve(&trades, &[]).unwrap();
        assert_eq!(
            curve.iter().map(|p| p.value).collect::<Vec<_>>(),
            vec![dec!(200), dec!(100)]
        );
    }

    #[test]
    fn test_all_wins_leave_ratios_undefined() {
        let trades = vec![
            win("1", "2024-01-01", dec!(50)),
            win("2", "2024-01-02", dec!(50)),
            win("3", "2024-01-03", dec!(50)),
        ];

        let metrics = AnalyticsEngine::new().calculate(&trades).unwrap();

        assert_eq!(metrics.profit_factor, None);
        assert_eq!(metrics.risk_reward, None);
        assert_eq!(metrics.average_loss, None);
        assert_eq!(metrics.average_win, Some(dec!(50)));
        assert_eq!(metrics.win_rate, dec!(100));
        assert_eq!(metrics.max_drawdown, dec!(0));
    }

    #[test]
    fn test_all_losses_leave_ratios_undefined() {
        let trades = vec![
            loss("1", "2024-01-01", dec!(10)),
            loss("2", "2024-01-02", dec!(30)),
        ];

        let metrics = AnalyticsEngine::new().calculate(&trades).unwrap();

        assert_eq!(metrics.profit_factor, None);
        assert_eq!(metrics.risk_reward, None);
        assert_eq!(metrics.average_win, None);
        assert_eq!(metrics.average_loss, Some(dec!(-20)));
        assert_eq!(metrics.win_rate, dec!(0));
        // Peak stays at the zero starting line.
        assert_eq!(metrics.max_drawdown, dec!(40));
    }

    #[test]
    fn test_deposits_do_not_mask_drawdown() {
        let trades = vec![loss("1", "2024-01-02", dec!(300))];
        let deposits = vec![CashMove::new("d", day("2024-01-01"), dec!(1000))];

        let curve = build_equity_curve(&trades, &deposits).unwrap();
        assert_eq!(
            curve.iter().map(|p| p.value).collect::<Vec<_>>(),
            vec![dec!(1000), dec!(700)]
        );

        let metrics = AnalyticsEngine::new().calculate(&trades).unwrap();
        assert_eq!(metrics.max_drawdown, dec!(300));
    }

    #[test]
    fn test_drawdown_uses_chronological_order() {
        // Listed out of order: chronologically it is +100, -150, +20, -40.
        let trades = vec![
            win("c", "2024-01-03", dec!(20)),
            win("a", "2024-01-01", dec!(100)),
            loss("d", "2024-01-04", dec!(40)),
            loss("b", "2024-01-02", dec!(150)),
        ];

        let metrics = AnalyticsEngine::new().calculate(&trades).unwrap();

        // Peak 100, trough -70.
        assert_eq!(metrics.max_drawdown, dec!(170));
    }

    #[test]
    fn test_non_decreasing_equity_has_no_drawdown() {
        let trades = vec![
            win("1", "2024-01-01", dec!(5)),
            win("2", "2024-01-02", dec!(0)),
            win("3", "2024-01-03", dec!(8)),
        ];
        let metrics = AnalyticsEngine::new().calculate(&trades).unwrap();
        assert_eq!(metrics.max_drawdown, dec!(0));
    }

    #[test]
    fn test_zero_amount_trade_lowers_win_rate_without_counting_as_loss() {
        let trades = vec![
            win("1", "2024-01-01", dec!(100)),
            loss("2", "2024-01-02", dec!(0)),
        ];

        let metrics = AnalyticsEngine::new().calculate(&trades).unwrap();

        assert_eq!(metrics.total_trades, 2);
        assert_eq!(metrics.winning_trades, 1);
        assert_eq!(metrics.losing_trades, 0);
        assert_eq!(metrics.win_rate, dec!(50));
        assert_eq!(metrics.average_loss, None);
        assert_eq!(metrics.profit_factor, None);
    }

    #[test]
    fn test_gross_totals_and_averages() {
        let trades = vec![
            win("1", "2024-01-01", dec!(300)),
            win("2", "2024-01-02", dec!(100)),
            loss("3", "2024-01-03", dec!(50)),
            loss("4", "2024-01-04", dec!(150)),
        ];

        let metrics = AnalyticsEngine::new().calculate(&trades).unwrap();

        assert_eq!(metrics.gross_profit, dec!(400));
        assert_eq!(metrics.gross_loss, dec!(200));
        assert_eq!(metrics.profit_factor, Some(dec!(2)));
        assert_eq!(metrics.average_win, Some(dec!(200)));
        assert_eq!(metrics.average_loss, Some(dec!(-100)));
        assert_eq!(metrics.risk_reward, Some(dec!(2)));
        assert_eq!(metrics.net_pnl, dec!(200));
    }

    #[test]
    fn test_daily_totals_match_net_pnl() {
        let trades = vec![
            win("1", "2024-01-01", dec!(12.5)),
            loss("2", "2024-01-01", dec!(3.25)),
            loss("3", "2024-01-04", dec!(40)),
            win("4", "2024-01-09", dec!(7)),
        ];

        let metrics = AnalyticsEngine::new().calculate(&trades).unwrap();
        let daily_total: Decimal = daily_pnl(&trades).unwrap().values().sum();

        assert_eq!(daily_total, metrics.net_pnl);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let trades = vec![
            win("1", "2024-01-01", dec!(10)),
            loss("2", "2024-01-02", dec!(3)),
            win("3", "2024-01-02", dec!(1)),
        ];
        let engine = AnalyticsEngine::new();

        let first = engine.calculate(&trades).unwrap();
        let second = engine.calculate(&trades).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.win_rate.serialize(), second.win_rate.serialize());
    }

    #[test]
    fn test_profit_factor_out_of_range_is_an_error_not_a_panic() {
        let trades = vec![
            win("1", "2024-01-01", dec!(1000000000000000)),
            loss("2", "2024-01-02", dec!(0.00000000000001)),
        ];

        let result = AnalyticsEngine::new().calculate(&trades);

        assert!(matches!(result, Err(AnalyticsError::Overflow("profit_factor"))));
    }

    #[test]
    fn test_risk_reward_out_of_range_is_an_error() {
        let trades = vec![
            win("1", "2024-01-01", dec!(1000000000000000)),
            loss("2", "2024-01-02", dec!(0.00000000000001)),
            loss("3", "2024-01-03", dec!(0.00000000000001)),
            loss("4", "2024-01-04", dec!(0.00000000000001)),
        ];

        let result = AnalyticsEngine::new().calculate(&trades);

        assert!(matches!(result, Err(AnalyticsError::Overflow("risk_reward"))));
    }

    #[test]
    fn test_net_pnl_out_of_range_is_an_error() {
        let trades = vec![
            win("1", "2024-01-01", Decimal::MAX),
            win("2", "2024-01-02", dec!(1)),
        ];

        let result = AnalyticsEngine::new().calculate(&trades);

        assert!(matches!(result, Err(AnalyticsError::Overflow("net_pnl"))));
    }

    #[test]
    fn test_account_summary_out_of_range_is_an_error() {
        let deposits = vec![
            CashMove::new("d1", day("2024-01-01"), Decimal::MAX),
            CashMove::new("d2", day("2024-01-02"), Decimal::MAX),
        ];

        let result = AnalyticsEngine::new().summarize_account(&[], &deposits);

        assert!(matches!(result, Err(AnalyticsError::Overflow("total_deposits"))));
    }

    #[test]
    fn test_malformed_trade_fails_fast() {
        let mut bad = win("bad", "2024-01-01", dec!(1));
        bad.amount = dec!(-1);
        let result = AnalyticsEngine::new().calculate(&[win("ok", "2024-01-01", dec!(1)), bad]);
        assert!(matches!(result, Err(AnalyticsError::InvalidRecord(_))));
    }

    #[test]
    fn test_account_summary_counts_deposits() {
        let trades = vec![win("1", "2024-01-02", dec!(50)), loss("2", "2024-01-03", dec!(20))];
        let deposits = vec![
            CashMove::new("d1", day("2024-01-01"), dec!(1000)),
            CashMove::new("d2", day("2024-01-05"), dec!(-200)),
        ];

        let summary = AnalyticsEngine::new().summarize_account(&trades, &deposits).unwrap();

        assert_eq!(summary.total_deposits, dec!(800));
        assert_eq!(summary.net_pnl, dec!(30));
        assert_eq!(summary.net_capital, dec!(830));
    }

    #[test]
    fn test_metrics_serialize_with_camel_case_names() {
        let json = serde_json::to_value(TrackRecordMetrics::new()).unwrap();
        assert!(json.get("netPnl").is_some());
        assert!(json.get("maxDrawdown").is_some());
        assert!(json["profitFactor"].is_null());
        assert_eq!(json["totalTrades"], 0);
    }
}
