use core::fmt;

use eyre::Result;
use serde::{Deserialize, Serialize};

use crate::config::Settings;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPattern {
    #[default]
    Randread,
    Randwrite,
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessPattern::Randread => write!(f, "randread"),
            AccessPattern::Randwrite => write!(f, "randwrite"),
        }
    }
}

/// One (queue depth, access pattern) combination of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunSpec {
    pub io_depth: usize,
    pub pattern: AccessPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub io_depth: usize,
    pub pattern: AccessPattern,
    pub mean_latency_ms: f64,
}

/// A source of per-run mean latency measurements. The production
/// implementation shells out to an exerciser and parses its report; tests
/// substitute a canned stub.
#[async_trait::async_trait]
pub trait LatencySource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Mean completion latency in milliseconds for a single run against
    /// the configured target. Runs to completion before returning.
    async fn mean_latency(&self, settings: &Settings, name: &str, run: &RunSpec) -> Result<f64>;
}
