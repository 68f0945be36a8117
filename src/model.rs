//! The synthetic transaction record.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Format used for `transaction_date` in storage and logs.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single fabricated banking transaction.
///
/// Created once by the generator and never mutated afterwards. `is_fraud` is
/// decided before every other field and `amount` and `location` follow from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub transaction_id: Uuid,
    /// Client number in `[1000, 9999]`; repeats across records are expected.
    pub client_id: u32,
    /// Generation time, second precision.
    #[serde(serialize_with = "serialize_timestamp")]
    pub transaction_date: NaiveDateTime,
    /// Always positive with exactly two fractional digits.
    pub amount: Decimal,
    pub merchant: String,
    pub location: String,
    pub is_fraud: bool,
}

impl Transaction {
    /// The `transaction_date` rendered the way it is stored.
    pub fn formatted_date(&self) -> String {
        self.transaction_date.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn serialize_timestamp<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&date.format(TIMESTAMP_FORMAT))
}
