use crate::enums::{TradeOutcome, TradeSide};
use crate::structs::Trade;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Selects the subset of trades under analysis.
///
/// Every criterion is optional; an empty filter keeps everything. Date bounds are
/// inclusive and the asset match is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeFilter {
    pub asset: Option<String>,
    pub side: Option<TradeSide>,
    pub outcome: Option<TradeOutcome>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TradeFilter {
    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(asset) = &self.asset {
            if !trade.asset.eq_ignore_ascii_case(asset) {
                return false;
            }
        }
        if self.side.is_some_and(|side| side != trade.side) {
            return false;
        }
        if self.outcome.is_some_and(|outcome| outcome != trade.outcome) {
            return false;
        }
        if self.from.is_some_and(|from| trade.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| trade.date > to) {
            return false;
        }
        true
    }

    /// Returns the matching trades in their original order.
    pub fn apply(&self, trades: &[Trade]) -> Vec<Trade> {
        trades.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
