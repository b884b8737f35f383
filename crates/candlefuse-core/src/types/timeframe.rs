//! Timeframe definitions for market data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timeframe for bars.
///
/// Variants are declared fine to coarse, so the derived `Ord` gives the
/// strict coarsening order `M1 < M5 < M15 < M30 < D1 < W1 < Mn`. Only
/// fine-to-coarse aggregation is defined between two timeframes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Timeframe {
    /// 1 minute bars
    #[serde(rename = "M1")]
    M1,
    /// 5 minute bars
    #[serde(rename = "M5")]
    M5,
    /// 15 minute bars
    #[serde(rename = "M15")]
    M15,
    /// 30 minute bars
    #[serde(rename = "M30")]
    M30,
    /// Daily bars
    #[serde(rename = "D1")]
    #[default]
    D1,
    /// Weekly bars (ISO week buckets)
    #[serde(rename = "W1")]
    W1,
    /// Monthly bars (calendar month buckets)
    #[serde(rename = "MN")]
    Mn,
}

impl Timeframe {
    /// Nominal duration of the timeframe in seconds.
    ///
    /// Weekly and monthly buckets are calendar aligned, so these values
    /// are only nominal for them.
    pub fn as_secs(&self) -> u64 {
        match self {
            Timeframe::M1 => 60,
            Timeframe::M5 => 300,
            Timeframe::M15 => 900,
            Timeframe::M30 => 1800,
            Timeframe::D1 => 86400,
            Timeframe::W1 => 604800,
            Timeframe::Mn => 2592000,
        }
    }

    /// Check if this is an intraday timeframe.
    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            Timeframe::M1 | Timeframe::M5 | Timeframe::M15 | Timeframe::M30
        )
    }

    /// All timeframes, fine to coarse.
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::M1,
            Timeframe::M5,
            Timeframe::M15,
            Timeframe::M30,
            Timeframe::D1,
            Timeframe::W1,
            Timeframe::Mn,
        ]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::M1 => "M1",
            Timeframe::M5 => "M5",
            Timeframe::M15 => "M15",
            Timeframe::M30 => "M30",
            Timeframe::D1 => "D1",
            Timeframe::W1 => "W1",
            Timeframe::Mn => "MN",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = crate::error::DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "M1" | "1M" | "1MIN" => Ok(Timeframe::M1),
            "M5" | "5M" | "5MIN" => Ok(Timeframe::M5),
            "M15" | "15M" | "15MIN" => Ok(Timeframe::M15),
            "M30" | "30M" | "30MIN" => Ok(Timeframe::M30),
            "D1" | "1D" | "DAILY" => Ok(Timeframe::D1),
            "W1" | "1W" | "WEEKLY" => Ok(Timeframe::W1),
            "MN" | "MONTHLY" => Ok(Timeframe::Mn),
            _ => Err(crate::error::DataError::InvalidTimeframe(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coarsening_order() {
        assert!(Timeframe::M1 < Timeframe::M5);
        assert!(Timeframe::M30 < Timeframe::D1);
        assert!(Timeframe::D1 < Timeframe::W1);
        assert!(Timeframe::W1 < Timeframe::Mn);
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!(Timeframe::from_str("M1").unwrap(), Timeframe::M1);
        assert_eq!(Timeframe::from_str("d1").unwrap(), Timeframe::D1);
        assert_eq!(Timeframe::from_str("weekly").unwrap(), Timeframe::W1);
        assert!(Timeframe::from_str("H7").is_err());
    }

    #[test]
    fn test_timeframe_display_roundtrip() {
        for tf in Timeframe::all() {
            assert_eq!(Timeframe::from_str(&tf.to_string()).unwrap(), *tf);
        }
    }

    #[test]
    fn test_is_intraday() {
        assert!(Timeframe::M1.is_intraday());
        assert!(Timeframe::M30.is_intraday());
        assert!(!Timeframe::D1.is_intraday());
        assert!(!Timeframe::Mn.is_intraday());
    }
}
