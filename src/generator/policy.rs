//! Fraud labelling policy.
//!
//! Holds every literal that shapes a generated transaction so that different
//! environments can run different policies from configuration.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for rejected fraud policies.
#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("fraud probability must be within [0, 1], got {0}")]
    Probability(f64),

    #[error("{label} amount range is invalid: min {min} must be positive and not above max {max}")]
    AmountRange {
        label: &'static str,
        min: Decimal,
        max: Decimal,
    },

    #[error("home location cannot be empty")]
    EmptyHomeLocation,
}

/// Inclusive amount range, held in cents so draws are exact to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange {
    min_cents: i64,
    max_cents: i64,
}

impl AmountRange {
    /// Create a range from whole cents, e.g. `from_cents(1_000, 50_000)` for 10.00..=500.00.
    pub const fn from_cents(min_cents: i64, max_cents: i64) -> Self {
        Self {
            min_cents,
            max_cents,
        }
    }

    pub fn min_cents(&self) -> i64 {
        self.min_cents
    }

    pub fn max_cents(&self) -> i64 {
        self.max_cents
    }

    /// Lower bound as a two-digit decimal.
    pub fn min(&self) -> Decimal {
        Decimal::new(self.min_cents, 2)
    }

    /// Upper bound as a two-digit decimal.
    pub fn max(&self) -> Decimal {
        Decimal::new(self.max_cents, 2)
    }

    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min() && amount <= self.max()
    }

    fn validate(&self, label: &'static str) -> Result<(), PolicyError> {
        if self.min_cents <= 0 || self.min_cents > self.max_cents {
            return Err(PolicyError::AmountRange {
                label,
                min: self.min(),
                max: self.max(),
            });
        }
        Ok(())
    }
}

/// Policy deciding the fraud label and the fields derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FraudPolicy {
    /// Bernoulli probability of `is_fraud = true`
    pub fraud_probability: f64,
    /// Amounts drawn for fraudulent transactions
    pub fraud_amount: AmountRange,
    /// Amounts drawn for legitimate transactions
    pub normal_amount: AmountRange,
    /// Location stamped on every legitimate transaction
    pub home_location: String,
}

impl Default for FraudPolicy {
    fn default() -> Self {
        Self {
            fraud_probability: 0.05,
            fraud_amount: AmountRange::from_cents(500_000, 2_000_000),
            normal_amount: AmountRange::from_cents(1_000, 50_000),
            home_location: "Mexico".into(),
        }
    }
}

impl FraudPolicy {
    /// Default policy with a different fraud probability.
    pub fn with_probability(fraud_probability: f64) -> Result<Self, PolicyError> {
        let policy = Self {
            fraud_probability,
            ..Self::default()
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check that the policy can drive the generator.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !(0.0..=1.0).contains(&self.fraud_probability) {
            return Err(PolicyError::Probability(self.fraud_probability));
        }
        self.fraud_amount.validate("fraud")?;
        self.normal_amount.validate("normal")?;
        if self.home_location.trim().is_empty() {
            return Err(PolicyError::EmptyHomeLocation);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_policy() {
        let policy = FraudPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.fraud_amount.min(), dec!(5000.00));
        assert_eq!(policy.fraud_amount.max(), dec!(20000.00));
        assert_eq!(policy.normal_amount.min(), dec!(10.00));
        assert_eq!(policy.normal_amount.max(), dec!(500.00));
        assert_eq!(policy.home_location, "Mexico");
    }

    #[test]
    fn test_probability_out_of_range() {
        assert_eq!(
            FraudPolicy::with_probability(1.5),
            Err(PolicyError::Probability(1.5))
        );
        assert!(FraudPolicy::with_probability(f64::NAN).is_err());
        assert!(FraudPolicy::with_probability(0.0).is_ok());
        assert!(FraudPolicy::with_probability(1.0).is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let policy = FraudPolicy {
            normal_amount: AmountRange::from_cents(50_000, 1_000),
            ..FraudPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::AmountRange { label: "normal", .. })
        ));
    }

    #[test]
    fn test_non_positive_minimum_rejected() {
        let policy = FraudPolicy {
            fraud_amount: AmountRange::from_cents(0, 100),
            ..FraudPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_empty_home_location_rejected() {
        let policy = FraudPolicy {
            home_location: "  ".into(),
            ..FraudPolicy::default()
        };
        assert_eq!(policy.validate(), Err(PolicyError::EmptyHomeLocation));
    }

    #[test]
    fn test_range_contains_bounds() {
        let range = AmountRange::from_cents(1_000, 50_000);
        assert!(range.contains(dec!(10.00)));
        assert!(range.contains(dec!(500.00)));
        assert!(!range.contains(dec!(500.01)));
        assert!(!range.contains(dec!(9.99)));
    }
}
