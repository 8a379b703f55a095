use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The direction of a closed position. Informational only, it never affects P&L sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Long,
    Short,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Long => "long",
            TradeSide::Short => "short",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeSide {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(TradeSide::Long),
            "short" => Ok(TradeSide::Short),
            other => Err(CoreError::InvalidInput(
                "side".to_string(),
                format!("expected 'long' or 'short', got '{other}'"),
            )),
        }
    }
}

/// Whether a trade closed in profit or at a loss. Determines the sign of its P&L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Win,
    Loss,
}

impl TradeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeOutcome::Win => "win",
            TradeOutcome::Loss => "loss",
        }
    }
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeOutcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(TradeOutcome::Win),
            "loss" => Ok(TradeOutcome::Loss),
            other => Err(CoreError::InvalidInput(
                "outcome".to_string(),
                format!("expected 'win' or 'loss', got '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_side_and_outcome() {
        assert_eq!("long".parse::<TradeSide>().unwrap(), TradeSide::Long);
        assert_eq!(" Short ".parse::<TradeSide>().unwrap(), TradeSide::Short);
        assert_eq!("WIN".parse::<TradeOutcome>().unwrap(), TradeOutcome::Win);
        assert_eq!("loss".parse::<TradeOutcome>().unwrap(), TradeOutcome::Loss);
    }

    #[test]
    fn test_unknown_outcome_is_rejected() {
        let err = "breakeven".parse::<TradeOutcome>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "outcome"));
        assert!("sideways".parse::<TradeSide>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&TradeOutcome::Loss).unwrap(), "\"loss\"");
        let side: TradeSide = serde_json::from_str("\"short\"").unwrap();
        assert_eq!(side, TradeSide::Short);
        assert!(serde_json::from_str::<TradeOutcome>("\"draw\"").is_err());
    }
}
