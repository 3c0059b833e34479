//! Domain entities for boards and their tasks.

use std::time::{SystemTime, UNIX_EPOCH};

pub mod board;
pub mod task;

/// Length every idempotency token must have (UUID text form).
pub const IDEMPOTENCY_KEY_LEN: usize = 36;

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
