use crate::error::DbError;
use crate::journal::Journal;
use crate::store::RecordStore;
use core_types::{CashMove, Trade, TradeOutcome, TradeSide};
use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};

/// The remote record store, backed by PostgreSQL.
///
/// Records are listed in insertion order (`seq`), matching the order the local
/// store keeps, so same-day tie-breaks do not depend on the backend.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a new `PgStore` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn trade_from_row(row: &PgRow) -> Result<Trade, DbError> {
        let side: String = row.try_get("side")?;
        let outcome: String = row.try_get("outcome")?;

        let trade = Trade::new(
            row.try_get::<String, _>("id")?,
            row.try_get("date")?,
            row.try_get::<String, _>("asset")?,
            side.parse::<TradeSide>()?,
            outcome.parse::<TradeOutcome>()?,
            row.try_get("amount")?,
        )?;

        Ok(Trade {
            note: row.try_get("note")?,
            ..trade
        })
    }

    fn cash_move_from_row(row: &PgRow) -> Result<CashMove, DbError> {
        Ok(CashMove {
            id: row.try_get("id")?,
            date: row.try_get("date")?,
            amount: row.try_get("amount")?,
            note: row.try_get("note")?,
        })
    }
}

impl RecordStore for PgStore {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn list(&self) -> Result<Journal, DbError> {
        let trade_rows = sqlx::query(
            r#"
            SELECT id, date, asset, side, outcome, amount, note
            FROM trades
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let cash_rows = sqlx::query(
            r#"
            SELECT id, date, amount, note
            FROM cash_moves
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let trades = trade_rows
            .iter()
            .map(Self::trade_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let cash_moves = cash_rows
            .iter()
            .map(Self::cash_move_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Journal { trades, cash_moves })
    }

    /// Uses `ON CONFLICT ... DO UPDATE` so re-saving a trade edits it in place.
    async fn insert_trade(&self, trade: &Trade) -> Result<(), DbError> {
        trade.validate()?;
        sqlx::query(
            r#"
            INSERT INTO trades (id, date, asset, side, outcome, amount, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                date = EXCLUDED.date,
                asset = EXCLUDED.asset,
                side = EXCLUDED.side,
                outcome = EXCLUDED.outcome,
                amount = EXCLUDED.amount,
                note = EXCLUDED.note
            "#,
        )
        .bind(&trade.id)
        .bind(trade.date)
        .bind(&trade.asset)
        .bind(trade.side.as_str())
        .bind(trade.outcome.as_str())
        .bind(trade.amount)
        .bind(trade.note.as_deref())
        .execute(&self.pool)
        .await?;

        tracing::info!(id = %trade.id, "Saved trade to remote store");
        Ok(())
    }

    async fn insert_cash_move(&self, cash_move: &CashMove) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO cash_moves (id, date, amount, note)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                date = EXCLUDED.date,
                amount = EXCLUDED.amount,
                note = EXCLUDED.note
            "#,
        )
        .bind(&cash_move.id)
        .bind(cash_move.date)
        .bind(cash_move.amount)
        .bind(cash_move.note.as_deref())
        .execute(&self.pool)
        .await?;

        tracing::info!(id = %cash_move.id, "Saved cash move to remote store");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        let trades = sqlx::query("DELETE FROM trades WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let cash_moves = sqlx::query("DELETE FROM cash_moves WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        let removed = trades + cash_moves > 0;
        if removed {
            tracing::info!(id, "Deleted record from remote store");
        }
        Ok(removed)
    }
}
