use crate::error::DbError;
use crate::journal::Journal;
use crate::store::RecordStore;
use core_types::{CashMove, Trade};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// A record store backed by a single JSON file on the local disk.
///
/// A missing file is an empty journal. Every mutation rewrites the file through a
/// temporary sibling and a rename, so a crash never leaves a half-written journal.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Journal, DbError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Journal::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Journal::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, journal: &Journal) -> Result<(), DbError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(journal)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

impl RecordStore for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn list(&self) -> Result<Journal, DbError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn insert_trade(&self, trade: &Trade) -> Result<(), DbError> {
        trade.validate()?;
        let _guard = self.lock.lock().await;
        let mut journal = self.read().await?;
        journal.upsert_trade(trade.clone());
        self.write(&journal).await?;
        tracing::info!(id = %trade.id, path = %self.path.display(), "Saved trade to local journal");
        Ok(())
    }

    async fn insert_cash_move(&self, cash_move: &CashMove) -> Result<(), DbError> {
        let _guard = self.lock.lock().await;
        let mut journal = self.read().await?;
        journal.upsert_cash_move(cash_move.clone());
        self.write(&journal).await?;
        tracing::info!(
            id = %cash_move.id,
            path = %self.path.display(),
            "Saved cash move to local journal"
        );
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let _guard = self.lock.lock().await;
        let mut journal = self.read().await?;
        let removed = journal.remove(id);
        if removed {
            self.write(&journal).await?;
            tracing::info!(id, path = %self.path.display(), "Deleted record from local journal");
        }
        Ok(removed)
    }
}
