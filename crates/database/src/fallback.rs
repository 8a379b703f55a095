use crate::error::DbError;
use crate::journal::Journal;
use crate::store::RecordStore;
use core_types::{CashMove, Trade};

/// Chains two stores with a fixed order: writes go to `primary` first and only
/// reach `fallback` if the primary fails.
///
/// The fallback is not a replica, but records written to it during an outage stay
/// visible: `list` returns the primary's records followed by the fallback's, with
/// the primary's copy winning on a shared `id`, and `delete` removes the id from both.
#[derive(Debug)]
pub struct FallbackStore<P, F> {
    primary: P,
    fallback: F,
}

impl<P: RecordStore, F: RecordStore> FallbackStore<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    fn log_fallback_skipped(&self, operation: &str, error: &DbError) {
        tracing::warn!(
            primary = self.primary.name(),
            fallback = self.fallback.name(),
            operation,
            %error,
            "Fallback store failed, continuing with the primary alone"
        );
    }

    fn log_fallback(&self, operation: &str, error: &DbError) {
        tracing::warn!(
            primary = self.primary.name(),
            fallback = self.fallback.name(),
            operation,
            %error,
            "Primary store failed, using fallback"
        );
    }
}

impl<P: RecordStore, F: RecordStore> RecordStore for FallbackStore<P, F> {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn list(&self) -> Result<Journal, DbError> {
        let journal = match self.primary.list().await {
            Ok(mut journal) => match self.fallback.list().await {
                Ok(offline) => {
                    journal.trades.extend(offline.trades);
                    journal.cash_moves.extend(offline.cash_moves);
                    journal
                }
                Err(e) => {
                    self.log_fallback_skipped("list", &e);
                    journal
                }
            },
            Err(e) => {
                self.log_fallback("list", &e);
                self.fallback.list().await?
            }
        };
        Ok(journal.dedup_by_id())
    }

    async fn insert_trade(&self, trade: &Trade) -> Result<(), DbError> {
        // A malformed record would fail on both stores; reject it before trying either.
        trade.validate()?;
        match self.primary.insert_trade(trade).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.log_fallback("insert_trade", &e);
                self.fallback.insert_trade(trade).await
            }
        }
    }

    async fn insert_cash_move(&self, cash_move: &CashMove) -> Result<(), DbError> {
        match self.primary.insert_cash_move(cash_move).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.log_fallback("insert_cash_move", &e);
                self.fallback.insert_cash_move(cash_move).await
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        match self.primary.delete(id).await {
            Ok(removed) => match self.fallback.delete(id).await {
                Ok(removed_offline) => Ok(removed || removed_offline),
                Err(e) => {
                    self.log_fallback_skipped("delete", &e);
                    Ok(removed)
                }
            },
            Err(e) => {
                self.log_fallback("delete", &e);
                self.fallback.delete(id).await
            }
        }
    }
}
