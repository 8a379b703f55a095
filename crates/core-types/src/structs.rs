use crate::enums::{TradeOutcome, TradeSide};
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a fresh opaque identifier for a newly logged record.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// One closed position outcome, as logged by the user.
///
/// `amount` is an unsigned magnitude. The realized P&L sign comes from
/// `outcome` alone, so a negative `amount` is rejected wherever a `Trade`
/// enters the system (constructor, deserialization, analytics entry points).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TradeRecord")]
pub struct Trade {
    pub id: String,
    pub date: NaiveDate,
    pub asset: String,
    pub side: TradeSide,
    pub outcome: TradeOutcome,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The unvalidated wire shape of a `Trade`.
#[derive(Debug, Deserialize)]
struct TradeRecord {
    id: String,
    date: NaiveDate,
    asset: String,
    side: TradeSide,
    outcome: TradeOutcome,
    amount: Decimal,
    #[serde(default)]
    note: Option<String>,
}

impl TryFrom<TradeRecord> for Trade {
    type Error = CoreError;

    fn try_from(raw: TradeRecord) -> Result<Self, Self::Error> {
        let trade = Trade {
            id: raw.id,
            date: raw.date,
            asset: raw.asset,
            side: raw.side,
            outcome: raw.outcome,
            amount: raw.amount,
            note: raw.note,
        };
        trade.validate()?;
        Ok(trade)
    }
}

impl Trade {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        asset: impl Into<String>,
        side: TradeSide,
        outcome: TradeOutcome,
        amount: Decimal,
    ) -> Result<Self, CoreError> {
        let trade = Self {
            id: id.into(),
            date,
            asset: asset.into(),
            side,
            outcome,
            amount,
            note: None,
        };
        trade.validate()?;
        Ok(trade)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Checks the record-level invariants: a non-empty id and `amount >= 0`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidRecord {
                id: self.id.clone(),
                reason: "trade id must not be empty".to_string(),
            });
        }
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(CoreError::InvalidRecord {
                id: self.id.clone(),
                reason: format!("trade amount must be non-negative, got {}", self.amount),
            });
        }
        Ok(())
    }
}

/// A capital contribution (positive) or withdrawal (negative).
///
/// Cash moves only ever affect cumulative equity and net capital,
/// never win/loss statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashMove {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CashMove {
    pub fn new(id: impl Into<String>, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Parses an ISO `yyyy-mm-dd` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| CoreError::InvalidInput("date".to_string(), format!("'{input}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_new_trade_rejects_negative_amount() {
        let err = Trade::new(
            "t1",
            day("2024-01-01"),
            "BTCUSDT",
            TradeSide::Long,
            TradeOutcome::Loss,
            dec!(-5),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord { id, .. } if id == "t1"));
    }

    #[test]
    fn test_zero_amount_trade_is_allowed() {
        let trade = Trade::new(
            "t1",
            day("2024-01-01"),
            "ES",
            TradeSide::Short,
            TradeOutcome::Win,
            dec!(0),
        );
        assert!(trade.is_ok());
    }

    #[test]
    fn test_trade_deserializes_from_json() {
        let json = r#"{"id":"a","date":"2024-03-05","asset":"EURUSD","side":"short","outcome":"win","amount":"12.5"}"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.date, day("2024-03-05"));
        assert_eq!(trade.amount, dec!(12.5));
        assert_eq!(trade.note, None);
    }

    #[test]
    fn test_trade_deserialization_validates_amount() {
        let json = r#"{"id":"a","date":"2024-03-05","asset":"EURUSD","side":"long","outcome":"loss","amount":"-3"}"#;
        assert!(serde_json::from_str::<Trade>(json).is_err());
    }

    #[test]
    fn test_trade_deserialization_rejects_bad_date_and_outcome() {
        let bad_date = r#"{"id":"a","date":"2024-13-40","asset":"X","side":"long","outcome":"win","amount":"1"}"#;
        assert!(serde_json::from_str::<Trade>(bad_date).is_err());

        let bad_outcome = r#"{"id":"a","date":"2024-01-01","asset":"X","side":"long","outcome":"push","amount":"1"}"#;
        assert!(serde_json::from_str::<Trade>(bad_outcome).is_err());
    }

    #[test]
    fn test_cash_move_keeps_sign() {
        let withdrawal = CashMove::new("c1", day("2024-02-01"), dec!(-250)).with_note("rent");
        assert_eq!(withdrawal.amount, dec!(-250));
        assert_eq!(withdrawal.note.as_deref(), Some("rent"));
    }

    #[test]
    fn test_parse_date_errors_are_typed() {
        assert!(matches!(
            parse_date("01/02/2024"),
            Err(CoreError::InvalidInput(field, _)) if field == "date"
        ));
    }

    #[test]
    fn test_new_record_ids_are_unique() {
        assert_ne!(new_record_id(), new_record_id());
    }
}
