use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, as reported in API status payloads.
pub type EpochMillis = u64;

pub fn now_epoch_millis() -> EpochMillis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as EpochMillis)
        .unwrap_or_default()
}
