//! Synthetic transaction generation.
//!
//! Generation is pure: a seeded generator given the same clock value always
//! yields the same records. The fraud label is drawn first and the amount and
//! location are derived from it.

pub mod names;
pub mod policy;

pub use policy::{AmountRange, FraudPolicy, PolicyError};

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use uuid::{Builder, Uuid};

use crate::model::Transaction;
use crate::now_seconds;

/// Lowest client number handed out.
pub const CLIENT_ID_MIN: u32 = 1000;
/// Highest client number handed out.
pub const CLIENT_ID_MAX: u32 = 9999;

/// Produces synthetic transactions from a random source and a [`FraudPolicy`].
///
/// The policy is expected to have passed [`FraudPolicy::validate`]; a fraud
/// probability outside `[0, 1]` panics on the first draw.
#[derive(Debug, Clone)]
pub struct TransactionGenerator<R = StdRng> {
    rng: R,
    policy: FraudPolicy,
}

impl TransactionGenerator<StdRng> {
    /// Create a generator seeded from OS entropy.
    pub fn new(policy: FraudPolicy) -> Self {
        Self::with_rng(StdRng::from_entropy(), policy)
    }

    /// Create a reproducible generator.
    pub fn seeded(seed: u64, policy: FraudPolicy) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), policy)
    }

    /// Seeded when `seed` is given, entropy-backed otherwise.
    pub fn from_seed_option(seed: Option<u64>, policy: FraudPolicy) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed, policy),
            None => Self::new(policy),
        }
    }
}

impl<R: Rng> TransactionGenerator<R> {
    /// Create a generator over any random source.
    pub fn with_rng(rng: R, policy: FraudPolicy) -> Self {
        Self { rng, policy }
    }

    /// Generate one transaction stamped with the current time.
    pub fn generate(&mut self) -> Transaction {
        self.generate_at(now_seconds())
    }

    /// Generate one transaction stamped with `now`.
    pub fn generate_at(&mut self, now: NaiveDateTime) -> Transaction {
        let is_fraud = self.rng.gen_bool(self.policy.fraud_probability);

        let (amount, location) = if is_fraud {
            let amount = self.draw_amount(self.policy.fraud_amount);
            (amount, names::country(&mut self.rng))
        } else {
            let amount = self.draw_amount(self.policy.normal_amount);
            (amount, self.policy.home_location.clone())
        };

        let transaction_id = self.draw_uuid();
        let client_id = self.rng.gen_range(CLIENT_ID_MIN..=CLIENT_ID_MAX);
        let merchant = names::company(&mut self.rng);

        Transaction {
            transaction_id,
            client_id,
            transaction_date: now,
            amount,
            merchant,
            location,
            is_fraud,
        }
    }

    /// Generate `count` transactions stamped with the current time.
    pub fn generate_batch(&mut self, count: usize) -> Vec<Transaction> {
        let now = now_seconds();
        (0..count).map(|_| self.generate_at(now)).collect()
    }

    fn draw_amount(&mut self, range: AmountRange) -> Decimal {
        let cents = self.rng.gen_range(range.min_cents()..=range.max_cents());
        Decimal::new(cents, 2)
    }

    fn draw_uuid(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }
}
