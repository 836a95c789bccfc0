use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::invariants::{Container, Level};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogRecord {
    pub container: Container,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "msg")]
    pub message: String,
    pub level: Level,
    pub happiness: i64,
    pub id: u64,
}
