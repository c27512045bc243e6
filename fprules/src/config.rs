use crate::error::{MiningError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const FRACTION_EPSILON: f64 = 1e-9;

/// How the minimum support is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportThreshold {
    /// Absolute number of transactions.
    Count(usize),
    /// Share of all transactions, in `(0, 1]`.
    Fraction(f64),
}

impl SupportThreshold {
    pub fn validate(&self) -> Result<()> {
        match *self {
            SupportThreshold::Count(0) => Err(MiningError::InvalidMinSupport(
                "count must be at least 1".to_string(),
            )),
            SupportThreshold::Count(_) => Ok(()),
            SupportThreshold::Fraction(f) if f.is_finite() && f > 0.0 && f <= 1.0 => Ok(()),
            SupportThreshold::Fraction(f) => Err(MiningError::InvalidMinSupport(format!(
                "fraction {} is outside (0, 1]",
                f
            ))),
        }
    }

    /// Resolves the threshold to an absolute count over `num_transactions`.
    /// Never returns less than 1.
    ///
    /// A product within rounding error of a whole number is taken as that
    /// number, so `0.07` of 100 transactions is 7 rather than 8.
    pub fn min_count(&self, num_transactions: usize) -> usize {
        match *self {
            SupportThreshold::Count(count) => count.max(1),
            SupportThreshold::Fraction(f) => {
                let exact = f * num_transactions as f64;
                let nearest = exact.round();
                let count = if (exact - nearest).abs() <= FRACTION_EPSILON * nearest.max(1.0) {
                    nearest
                } else {
                    exact.ceil()
                };
                (count as usize).max(1)
            }
        }
    }
}

impl Default for SupportThreshold {
    fn default() -> Self {
        SupportThreshold::Count(1)
    }
}

/// Thresholds and runtime limits for one mining run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    pub min_support: SupportThreshold,
    pub min_confidence: f64,
    /// Longest itemset to report. Mining does not descend past it.
    pub max_itemset_len: Option<usize>,
    /// Wall-clock budget for the itemset search.
    pub time_limit: Option<Duration>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: SupportThreshold::default(),
            min_confidence: 0.0,
            max_itemset_len: None,
            time_limit: None,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: usize, min_confidence: f64) -> Self {
        Self {
            min_support: SupportThreshold::Count(min_support),
            min_confidence,
            ..Self::default()
        }
    }

    pub fn with_min_support(mut self, min_support: SupportThreshold) -> Self {
        self.min_support = min_support;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_max_itemset_len(mut self, max_itemset_len: usize) -> Self {
        self.max_itemset_len = Some(max_itemset_len);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.min_support.validate()?;
        check_min_confidence(self.min_confidence)?;
        if self.max_itemset_len == Some(0) {
            return Err(MiningError::InvalidMaxItemsetLen);
        }
        Ok(())
    }
}

pub(crate) fn check_min_confidence(min_confidence: f64) -> Result<()> {
    if (0.0..=1.0).contains(&min_confidence) {
        Ok(())
    } else {
        Err(MiningError::InvalidMinConfidence(min_confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        assert!(MiningConfig::new(2, 0.5).validate().is_ok());
        assert_eq!(
            MiningConfig::new(0, 0.5).validate(),
            Err(MiningError::InvalidMinSupport("count must be at least 1".to_string()))
        );
        assert_eq!(
            MiningConfig::new(1, 1.5).validate(),
            Err(MiningError::InvalidMinConfidence(1.5))
        );
        assert!(MiningConfig::new(1, -0.1).validate().is_err());
        assert!(MiningConfig::new(1, f64::NAN).validate().is_err());
        assert_eq!(
            MiningConfig::new(1, 0.5).with_max_itemset_len(0).validate(),
            Err(MiningError::InvalidMaxItemsetLen)
        );
    }

    #[test]
    fn test_fraction_threshold() {
        let threshold = SupportThreshold::Fraction(0.25);
        assert!(threshold.validate().is_ok());
        assert_eq!(threshold.min_count(9), 3); // ceil(2.25)
        assert_eq!(threshold.min_count(8), 2);
        assert_eq!(threshold.min_count(0), 1);

        // Products that land a hair above a whole number are not rounded up.
        assert_eq!(SupportThreshold::Fraction(0.07).min_count(100), 7);
        assert_eq!(SupportThreshold::Fraction(0.1).min_count(30), 3);
        assert_eq!(SupportThreshold::Fraction(0.07).min_count(101), 8);

        assert!(SupportThreshold::Fraction(0.0).validate().is_err());
        assert!(SupportThreshold::Fraction(1.5).validate().is_err());
        assert!(SupportThreshold::Fraction(f64::INFINITY).validate().is_err());
    }
}
