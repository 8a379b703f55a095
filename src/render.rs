use analytics::{AccountSummary, EquityPoint, TrackRecordMetrics};
use chrono::NaiveDate;
use comfy_table::Table;
use database::Journal;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

fn money(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

fn optional(value: Option<Decimal>) -> String {
    value.map(money).unwrap_or_else(|| "n/a".to_string())
}

/// The summary cards, as a two-column table.
pub fn metrics_table(metrics: &TrackRecordMetrics, account: &AccountSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Net P&L".to_string(), money(metrics.net_pnl)]);
    table.add_row(vec!["Win Rate %".to_string(), money(metrics.win_rate)]);
    table.add_row(vec!["Profit Factor".to_string(), optional(metrics.profit_factor)]);
    table.add_row(vec!["Risk/Reward".to_string(), optional(metrics.risk_reward)]);
    table.add_row(vec!["Max Drawdown".to_string(), money(metrics.max_drawdown)]);
    table.add_row(vec!["Average Win".to_string(), optional(metrics.average_win)]);
    table.add_row(vec!["Average Loss".to_string(), optional(metrics.average_loss)]);
    table.add_row(vec![
        "Trades (W/L)".to_string(),
        format!(
            "{} ({}/{})",
            metrics.total_trades, metrics.winning_trades, metrics.losing_trades
        ),
    ]);
    table.add_row(vec!["Deposits".to_string(), money(account.total_deposits)]);
    table.add_row(vec!["Net Capital".to_string(), money(account.net_capital)]);
    table
}

pub fn equity_table(curve: &[EquityPoint]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "P&L", "Equity"]);
    for point in curve {
        table.add_row(vec![point.date.to_string(), money(point.pnl), money(point.value)]);
    }
    table
}

pub fn daily_table(days: &BTreeMap<NaiveDate, Decimal>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "P&L"]);
    for (date, pnl) in days {
        table.add_row(vec![date.to_string(), money(*pnl)]);
    }
    table
}

pub fn journal_table(journal: &Journal) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Id", "Date", "Kind", "Asset", "Side", "Outcome", "Amount", "Note"]);
    for trade in &journal.trades {
        table.add_row(vec![
            trade.id.clone(),
            trade.date.to_string(),
            "trade".to_string(),
            trade.asset.clone(),
            trade.side.to_string(),
            trade.outcome.to_string(),
            money(trade.amount),
            trade.note.clone().unwrap_or_default(),
        ]);
    }
    for cash_move in &journal.cash_moves {
        table.add_row(vec![
            cash_move.id.clone(),
            cash_move.date.to_string(),
            "cash".to_string(),
            String::new(),
            String::new(),
            String::new(),
            money(cash_move.amount),
            cash_move.note.clone().unwrap_or_default(),
        ]);
    }
    table
}
