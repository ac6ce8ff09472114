use crate::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("safety score {0} is outside 0..=100")]
    OutOfRange(f64),

    #[error("safety score {0} is not a whole number")]
    NotWhole(f64),
}

/// Safety rating of a route, always within 0..=100.
///
/// Serialized as a bare integer. Deserialization takes any JSON number, so
/// `90.0` is accepted, but rejects fractions and anything outside the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub struct SafetyScore(u8);

impl SafetyScore {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, ScoreError> {
        Self::try_from(value as i64)
    }

    /// Build a score, capping anything above 100
    pub fn saturating(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn tier(&self) -> SafetyTier {
        SafetyTier::from_score(*self)
    }
}

impl TryFrom<i64> for SafetyScore {
    type Error = ScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ScoreError::OutOfRange(value as f64))
        }
    }
}

impl TryFrom<f64> for SafetyScore {
    type Error = ScoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || !(0.0..=Self::MAX as f64).contains(&value) {
            return Err(ScoreError::OutOfRange(value));
        }
        if value.fract() != 0.0 {
            return Err(ScoreError::NotWhole(value));
        }
        Ok(Self(value as u8))
    }
}

impl From<SafetyScore> for u8 {
    fn from(score: SafetyScore) -> Self {
        score.0
    }
}

impl fmt::Display for SafetyScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse banding of a safety score.
///
/// Above 80 is safe, below 50 calls for caution; 50 and 80 themselves are
/// both moderate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyTier {
    Safe,
    Moderate,
    Caution,
}

impl SafetyTier {
    pub const SAFE_ABOVE: u8 = 80;
    pub const CAUTION_BELOW: u8 = 50;

    pub fn from_score(score: SafetyScore) -> Self {
        match score.value() {
            s if s > Self::SAFE_ABOVE => SafetyTier::Safe,
            s if s < Self::CAUTION_BELOW => SafetyTier::Caution,
            _ => SafetyTier::Moderate,
        }
    }

    /// Map colour used by the front-end for this tier
    pub fn color(&self) -> &'static str {
        match self {
            SafetyTier::Safe => "green",
            SafetyTier::Moderate => "yellow",
            SafetyTier::Caution => "red",
        }
    }

    /// Human-readable route name for this tier
    pub fn route_label(&self) -> &'static str {
        match self {
            SafetyTier::Safe => "Safest Path",
            SafetyTier::Moderate => "Balanced Route",
            SafetyTier::Caution => "Fast Shortcut",
        }
    }
}

/// A candidate walking route between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,

    /// Display name, e.g. "Safest Path"
    pub name: String,

    /// Map colour derived from the safety tier
    pub color: String,

    /// Ordered polyline from start to end, never empty
    pub waypoints: Vec<Location>,

    pub safety_score: SafetyScore,

    /// Descriptive tags such as "well-lit" or "isolated"
    pub features: Vec<String>,

    /// Length of the polyline in kilometres
    pub distance_km: f64,

    /// Walking time estimate in whole minutes
    pub eta_minutes: u32,
}

impl Route {
    pub fn tier(&self) -> SafetyTier {
        self.safety_score.tier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn score(v: u8) -> SafetyScore {
        SafetyScore::new(v).unwrap()
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(score(81).tier(), SafetyTier::Safe);
        assert_eq!(score(49).tier(), SafetyTier::Caution);
        assert_eq!(score(65).tier(), SafetyTier::Moderate);
    }

    #[test]
    fn test_tier_boundaries_are_moderate() {
        assert_eq!(score(80).tier(), SafetyTier::Moderate);
        assert_eq!(score(50).tier(), SafetyTier::Moderate);
        assert_eq!(score(100).tier(), SafetyTier::Safe);
        assert_eq!(score(0).tier(), SafetyTier::Caution);
    }

    #[test]
    fn test_score_rejects_out_of_range() {
        assert_eq!(SafetyScore::new(101), Err(ScoreError::OutOfRange(101.0)));
        assert_eq!(SafetyScore::try_from(-1i64), Err(ScoreError::OutOfRange(-1.0)));
        assert_eq!(
            SafetyScore::try_from(f64::NAN).map_err(|e| e.to_string()),
            Err("safety score NaN is outside 0..=100".to_string())
        );
    }

    #[test]
    fn test_score_from_whole_float() {
        assert_eq!(SafetyScore::try_from(90.0f64), Ok(score(90)));
        assert_eq!(SafetyScore::try_from(0.0f64), Ok(score(0)));
        assert_eq!(SafetyScore::try_from(100.0f64), Ok(score(100)));
        assert_eq!(SafetyScore::try_from(85.5f64), Err(ScoreError::NotWhole(85.5)));
        assert_eq!(SafetyScore::try_from(100.5f64), Err(ScoreError::OutOfRange(100.5)));
    }

    #[test]
    fn test_saturating_caps_at_max() {
        assert_eq!(SafetyScore::saturating(250).value(), 100);
        assert_eq!(SafetyScore::saturating(42).value(), 42);
    }

    #[test]
    fn test_score_serde() {
        assert_eq!(serde_json::to_string(&score(72)).unwrap(), "72");
        assert_eq!(serde_json::from_str::<SafetyScore>("90").unwrap(), score(90));
        assert_eq!(serde_json::from_str::<SafetyScore>("90.0").unwrap(), score(90));
        assert!(serde_json::from_str::<SafetyScore>("85.5").is_err());
        assert!(serde_json::from_str::<SafetyScore>("150").is_err());
        assert!(serde_json::from_str::<SafetyScore>("-3").is_err());
        assert!(serde_json::from_str::<SafetyScore>("\"90\"").is_err());
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(SafetyTier::Safe.color(), "green");
        assert_eq!(SafetyTier::Moderate.color(), "yellow");
        assert_eq!(SafetyTier::Caution.color(), "red");
    }

    proptest! {
        #[test]
        fn prop_every_valid_score_has_one_tier(v in 0u8..=100) {
            let tier = score(v).tier();
            let expected = if v > 80 {
                SafetyTier::Safe
            } else if v < 50 {
                SafetyTier::Caution
            } else {
                SafetyTier::Moderate
            };
            prop_assert_eq!(tier, expected);
        }

        #[test]
        fn prop_scores_above_range_rejected(v in 101i64..10_000) {
            prop_assert!(SafetyScore::try_from(v).is_err());
        }
    }
}
