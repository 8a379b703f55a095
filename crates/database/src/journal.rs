use core_types::{CashMove, Trade};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An immutable snapshot of every logged record, in storage order.
///
/// This is also the on-disk shape of the local journal file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub cash_moves: Vec<CashMove>,
}

impl Journal {
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty() && self.cash_moves.is_empty()
    }

    /// Drops every record whose `id` was already seen, keeping the first occurrence.
    pub fn dedup_by_id(mut self) -> Self {
        let mut seen = HashSet::new();
        self.trades.retain(|t| seen.insert(t.id.clone()));
        let mut seen = HashSet::new();
        self.cash_moves.retain(|c| seen.insert(c.id.clone()));
        self
    }

    /// Inserts the trade, replacing any existing trade with the same `id` in place.
    pub fn upsert_trade(&mut self, trade: Trade) {
        match self.trades.iter_mut().find(|t| t.id == trade.id) {
            Some(existing) => *existing = trade,
            None => self.trades.push(trade),
        }
    }

    /// Inserts the cash move, replacing any existing one with the same `id` in place.
    pub fn upsert_cash_move(&mut self, cash_move: CashMove) {
        match self.cash_moves.iter_mut().find(|c| c.id == cash_move.id) {
            Some(existing) => *existing = cash_move,
            None => self.cash_moves.push(cash_move),
        }
    }

    /// Removes the trade or cash move with this `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.trades.len() + self.cash_moves.len();
        self.trades.retain(|t| t.id != id);
        self.cash_moves.retain(|c| c.id != id);
        self.trades.len() + self.cash_moves.len() != before
    }
}
