use crate::error::AnalyticsError;
use core_types::{Trade, TradeOutcome};
use rust_decimal::Decimal;

/// Converts one trade into its signed monetary result.
///
/// The sign comes from `outcome` alone: `+amount` for a win, `-amount` for a loss.
pub fn trade_pnl(trade: &Trade) -> Decimal {
    match trade.outcome {
        TradeOutcome::Win => trade.amount,
        TradeOutcome::Loss => -trade.amount,
    }
}

/// `lhs + rhs`, or `AnalyticsError::Overflow` naming the quantity being computed.
pub(crate) fn checked_add(
    lhs: Decimal,
    rhs: Decimal,
    quantity: &'static str,
) -> Result<Decimal, AnalyticsError> {
    lhs.checked_add(rhs).ok_or(AnalyticsError::Overflow(quantity))
}

/// `lhs / rhs`, or `AnalyticsError::Overflow` naming the quantity being computed.
pub(crate) fn checked_div(
    lhs: Decimal,
    rhs: Decimal,
    quantity: &'static str,
) -> Result<Decimal, AnalyticsError> {
    lhs.checked_div(rhs).ok_or(AnalyticsError::Overflow(quantity))
}

/// Fails fast on the first trade that breaks the record contract.
pub(crate) fn validate_trades(trades: &[Trade]) -> Result<(), AnalyticsError> {
    for trade in trades {
        trade.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{TradeSide, parse_date};
    use rust_decimal_macros::dec;

    fn trade(side: TradeSide, outcome: TradeOutcome, amount: Decimal) -> Trade {
        Trade::new("t", parse_date("2024-01-01").unwrap(), "NQ", side, outcome, amount).unwrap()
    }

    #[test]
    fn test_win_is_positive_loss_is_negative() {
        assert_eq!(trade_pnl(&trade(TradeSide::Long, TradeOutcome::Win, dec!(42.5))), dec!(42.5));
        assert_eq!(trade_pnl(&trade(TradeSide::Long, TradeOutcome::Loss, dec!(42.5))), dec!(-42.5));
    }

    #[test]
    fn test_side_does_not_change_sign() {
        assert_eq!(trade_pnl(&trade(TradeSide::Short, TradeOutcome::Win, dec!(7))), dec!(7));
        assert_eq!(trade_pnl(&trade(TradeSide::Short, TradeOutcome::Loss, dec!(7))), dec!(-7));
    }

    #[test]
    fn test_checked_helpers_report_the_quantity() {
        assert_eq!(checked_add(dec!(1), dec!(2), "sum").unwrap(), dec!(3));
        assert!(matches!(
            checked_add(Decimal::MAX, dec!(1), "net_pnl"),
            Err(AnalyticsError::Overflow("net_pnl"))
        ));
        assert!(matches!(
            checked_div(Decimal::MAX, dec!(0.5), "profit_factor"),
            Err(AnalyticsError::Overflow("profit_factor"))
        ));
    }

    #[test]
    fn test_validate_trades_rejects_negative_amount() {
        let mut bad = trade(TradeSide::Long, TradeOutcome::Win, dec!(1));
        bad.amount = dec!(-1);
        let result = validate_trades(&[trade(TradeSide::Long, TradeOutcome::Win, dec!(1)), bad]);
        assert!(matches!(result, Err(AnalyticsError::InvalidRecord(_))));
    }
}
