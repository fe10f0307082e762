use serde::{Deserialize, Serialize};
use std::fmt;

/// Sampling interval identifier passed through to the provider (`5min`, `1h`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeframe(String);

impl Timeframe {
    pub fn new(interval: impl Into<String>) -> Self {
        Self(interval.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Timeframe {
    fn from(interval: &str) -> Self {
        Self::new(interval)
    }
}
