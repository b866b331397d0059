use serde::{Deserialize, Serialize};

/// Liveness payload returned by `/health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}
