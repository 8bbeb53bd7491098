/// Category ids, user ids and every other BIGSERIAL/BIGINT key.
pub type DbId = i64;

/// Record primary keys.
pub type RecordId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
