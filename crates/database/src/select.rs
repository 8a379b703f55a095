use crate::connection::{connect, run_migrations};
use crate::error::DbError;
use crate::fallback::FallbackStore;
use crate::journal::Journal;
use crate::local::LocalStore;
use crate::remote::PgStore;
use crate::store::RecordStore;
use configuration::{StorageMode, StorageSettings};
use core_types::{CashMove, Trade};

/// The store chosen from the storage settings at startup.
#[derive(Debug)]
pub enum AnyStore {
    Local(LocalStore),
    Remote(PgStore),
    RemoteWithFallback(FallbackStore<PgStore, LocalStore>),
}

/// Opens the record store described by `settings`.
///
/// In `Auto` mode the remote store is tried first; if it is not configured or
/// cannot be reached, the local journal file is used on its own.
pub async fn open_store(settings: &StorageSettings) -> Result<AnyStore, DbError> {
    let local = || LocalStore::new(settings.local_path.clone());

    match settings.mode {
        StorageMode::Local => Ok(AnyStore::Local(local())),
        StorageMode::Remote => Ok(AnyStore::Remote(open_remote(settings).await?)),
        StorageMode::Auto => {
            if settings.database_url.is_none() {
                tracing::debug!("No database configured, using the local journal");
                return Ok(AnyStore::Local(local()));
            }
            match open_remote(settings).await {
                Ok(remote) => Ok(AnyStore::RemoteWithFallback(FallbackStore::new(remote, local()))),
                Err(e) => {
                    tracing::warn!(error = %e, "Remote store unavailable, using the local journal");
                    Ok(AnyStore::Local(local()))
                }
            }
        }
    }
}

async fn open_remote(settings: &StorageSettings) -> Result<PgStore, DbError> {
    let pool = connect(settings).await?;
    run_migrations(&pool).await?;
    Ok(PgStore::new(pool))
}

impl RecordStore for AnyStore {
    fn name(&self) -> &'static str {
        match self {
            AnyStore::Local(store) => store.name(),
            AnyStore::Remote(store) => store.name(),
            AnyStore::RemoteWithFallback(store) => store.name(),
        }
    }

    async fn list(&self) -> Result<Journal, DbError> {
        match self {
            AnyStore::Local(store) => store.list().await,
            AnyStore::Remote(store) => store.list().await,
            AnyStore::RemoteWithFallback(store) => store.list().await,
        }
    }

    async fn insert_trade(&self, trade: &Trade) -> Result<(), DbError> {
        match self {
            AnyStore::Local(store) => store.insert_trade(trade).await,
            AnyStore::Remote(store) => store.insert_trade(trade).await,
            AnyStore::RemoteWithFallback(store) => store.insert_trade(trade).await,
        }
    }

    async fn insert_cash_move(&self, cash_move: &CashMove) -> Result<(), DbError> {
        match self {
            AnyStore::Local(store) => store.insert_cash_move(cash_move).await,
            AnyStore::Remote(store) => store.insert_cash_move(cash_move).await,
            AnyStore::RemoteWithFallback(store) => store.insert_cash_move(cash_move).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        match self {
            AnyStore::Local(store) => store.delete(id).await,
            AnyStore::Remote(store) => store.delete(id).await,
            AnyStore::RemoteWithFallback(store) => store.delete(id).await,
        }
    }
}
