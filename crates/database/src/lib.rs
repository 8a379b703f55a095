//! # Tradelog Storage Crate
//!
//! Persistence for the trade journal, behind a single capability: `RecordStore`
//! (`list`, `insert_trade`, `insert_cash_move`, `delete`).
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All storage-specific logic lives here. The analytics engine
//!   never depends on this crate; callers load a `Journal` snapshot and pass its lists on.
//! - **Deterministic Fallback:** With a database configured, the remote store is always
//!   tried first and the local JSON journal second.
//!
//! ## Public API
//!
//! - `RecordStore`: the capability trait.
//! - `PgStore`: the remote PostgreSQL store (`connect`, `run_migrations` set it up).
//! - `LocalStore`: the local JSON file store.
//! - `FallbackStore`: chains a primary and a fallback store.
//! - `open_store` / `AnyStore`: picks the stores from the storage settings.
//! - `DbError`: the specific error types that can be returned from this crate.

pub mod connection;
pub mod error;
pub mod fallback;
pub mod journal;
pub mod local;
pub mod remote;
pub mod select;
pub mod store;

pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use fallback::FallbackStore;
pub use journal::Journal;
pub use local::LocalStore;
pub use remote::PgStore;
pub use select::{AnyStore, open_store};
pub use store::RecordStore;
