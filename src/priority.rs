use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Priority ranks mapped to integers for storage and sorting
/// Lower number = Higher priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Rank {
    /// Canonical label stored in the `priority` column
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::High => "High",
            Rank::Medium => "Medium",
            Rank::Low => "Low",
        }
    }

    /// Numeric rank stored in the `priority_rank` column
    pub fn value(self) -> i64 {
        self as i64
    }
}

impl FromStr for Rank {
    type Err = AppError;

    /// Accepts the English labels in any case, and the single-character
    /// CJK labels older prompts asked the model to produce.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" | "高" => Ok(Rank::High),
            "medium" | "中" => Ok(Rank::Medium),
            "low" | "低" => Ok(Rank::Low),
            _ => Err(AppError::InvalidPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_from_str() {
        assert_eq!("High".parse::<Rank>().unwrap(), Rank::High);
        assert_eq!("medium".parse::<Rank>().unwrap(), Rank::Medium);
        assert_eq!("LOW".parse::<Rank>().unwrap(), Rank::Low);
        assert_eq!(" high ".parse::<Rank>().unwrap(), Rank::High);
    }

    #[test]
    fn test_rank_from_cjk_labels() {
        assert_eq!("高".parse::<Rank>().unwrap(), Rank::High);
        assert_eq!("中".parse::<Rank>().unwrap(), Rank::Medium);
        assert_eq!("低".parse::<Rank>().unwrap(), Rank::Low);
    }

    #[test]
    fn test_rank_from_str_invalid() {
        assert!("Urgent".parse::<Rank>().is_err());
        assert!("".parse::<Rank>().is_err());
        assert!(matches!(
            "critical".parse::<Rank>(),
            Err(AppError::InvalidPriority(p)) if p == "critical"
        ));
    }

    #[test]
    fn test_rank_values_order_high_first() {
        assert_eq!(Rank::High.value(), 1);
        assert_eq!(Rank::Medium.value(), 2);
        assert_eq!(Rank::Low.value(), 3);
        assert!(Rank::High < Rank::Medium && Rank::Medium < Rank::Low);
    }

    #[test]
    fn test_rank_display() {
        assert_eq!(Rank::Medium.to_string(), "Medium");
    }
}
