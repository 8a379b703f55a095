use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// A record in the input snapshot breaks the record contract (e.g. a negative trade amount).
    #[error("Rejected malformed input record: {0}")]
    InvalidRecord(#[from] CoreError),

    /// An intermediate value left the range `Decimal` can represent.
    #[error("Calculation error: Decimal overflow while computing '{0}'")]
    Overflow(&'static str),
}
