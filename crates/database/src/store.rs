use crate::error::DbError;
use crate::journal::Journal;
use core_types::{CashMove, Trade};
use std::future::Future;

/// The persistence capability the application consumes.
///
/// Implemented by the remote store (`PgStore`), the local cache (`LocalStore`)
/// and the `FallbackStore` that chains them. The analytics engine never sees
/// this trait; callers load a `Journal` snapshot and hand its lists over.
pub trait RecordStore: Send + Sync {
    /// A short label for log messages.
    fn name(&self) -> &'static str;

    /// Loads every record in storage order.
    fn list(&self) -> impl Future<Output = Result<Journal, DbError>> + Send;

    /// Saves a trade, replacing any trade with the same `id`.
    fn insert_trade(&self, trade: &Trade) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Saves a cash move, replacing any cash move with the same `id`.
    fn insert_cash_move(
        &self,
        cash_move: &CashMove,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Deletes the trade or cash move with this `id`. Returns `false` if nothing matched.
    fn delete(&self, id: &str) -> impl Future<Output = Result<bool, DbError>> + Send;
}
