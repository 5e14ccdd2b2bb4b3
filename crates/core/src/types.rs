/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Quiz scores are whole percentages in `0..=100`.
pub type Score = i32;

/// Monetary amounts are stored in the currency's minor unit (kobo, cents).
pub type MinorUnits = i64;
