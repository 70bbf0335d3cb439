/// Primary keys and identity references are UUIDs (v7 for rows created here).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a new time-ordered primary key.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}

/// Current time at the microsecond precision PostgreSQL stores, so values
/// round-trip through either backend unchanged.
pub fn now() -> Timestamp {
    use chrono::SubsecRound;
    chrono::Utc::now().trunc_subsecs(6)
}
