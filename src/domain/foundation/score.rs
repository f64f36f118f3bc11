//! Score value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// An integer score between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

/// Display band of a score, matching the gauge colours shown to visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// Below 50 (red).
    Low,
    /// 50 to 74 (yellow).
    Medium,
    /// 75 and above (green).
    High,
}

impl Score {
    /// Lowest valid score.
    pub const MIN: i64 = 0;

    /// Highest valid score.
    pub const MAX: i64 = 100;

    /// Creates a Score, returning error if out of range.
    pub fn try_new(field: &str, value: i64) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(field, Self::MIN, Self::MAX, value));
        }
        Ok(Self(value as u8))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the display band for this score.
    pub fn band(&self) -> ScoreBand {
        match self.0 {
            0..=49 => ScoreBand::Low,
            50..=74 => ScoreBand::Medium,
            _ => ScoreBand::High,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoreBand::Low => "Needs attention",
            ScoreBand::Medium => "Fair",
            ScoreBand::High => "Good",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accepts_bounds() {
        assert_eq!(Score::try_new("overallScore", 0).unwrap().value(), 0);
        assert_eq!(Score::try_new("overallScore", 100).unwrap().value(), 100);
    }

    #[test]
    fn score_rejects_out_of_range_values() {
        let err = Score::try_new("accessibilityScore", 101).unwrap_err();
        assert_eq!(
            err,
            ValidationError::out_of_range("accessibilityScore", 0, 100, 101)
        );
        assert!(Score::try_new("accessibilityScore", -1).is_err());
    }

    #[test]
    fn score_band_boundaries() {
        assert_eq!(Score::try_new("s", 49).unwrap().band(), ScoreBand::Low);
        assert_eq!(Score::try_new("s", 50).unwrap().band(), ScoreBand::Medium);
        assert_eq!(Score::try_new("s", 74).unwrap().band(), ScoreBand::Medium);
        assert_eq!(Score::try_new("s", 75).unwrap().band(), ScoreBand::High);
    }

    #[test]
    fn score_serializes_as_plain_number() {
        let score = Score::try_new("s", 80).unwrap();
        assert_eq!(serde_json::to_string(&score).unwrap(), "80");
    }
}
