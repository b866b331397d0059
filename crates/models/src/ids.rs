//! Record identifier generation.
//!
//! Identifiers are a microsecond UTC timestamp followed by a random suffix,
//! e.g. `1760870400123456-9f1c2ab4`. The timestamp keeps ids roughly ordered
//! by creation; the suffix makes two ids minted in the same microsecond differ.

use chrono::Utc;
use uuid::Uuid;

pub fn next_id() -> String {
    let micros = Utc::now().timestamp_micros();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{micros}-{}", &suffix[..8])
}
