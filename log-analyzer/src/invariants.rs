use derive_more::{AsRef, Debug, Display};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Display, AsRef, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Container(String);

impl Container {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for Container {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

/// Severity, ordered from least to most severe.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    #[display("DEBUG")]
    Debug,
    #[display("INFO")]
    Info,
    #[display("WARN")]
    Warn,
    #[display("ERROR")]
    Error,
    #[display("FATAL")]
    Fatal,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];
}
