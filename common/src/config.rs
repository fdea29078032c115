use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::bench::{AccessPattern, RunSpec};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Target block device or regular file the exerciser runs against.
    /// Expected to be at least as large as the configured run size; an
    /// unusable target surfaces as an exerciser failure.
    pub device: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub io_depths: Vec<usize>,
    pub patterns: Vec<AccessPattern>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            io_depths: (1..257).step_by(16).collect(),
            patterns: vec![AccessPattern::Randread, AccessPattern::Randwrite],
        }
    }
}

impl SweepConfig {
    /// All runs of the sweep, depth ascending in the outer position and
    /// pattern in configured order within each depth.
    pub fn runs(&self) -> Vec<RunSpec> {
        iproduct!(self.io_depths.iter(), self.patterns.iter())
            .map(|(io_depth, pattern)| RunSpec {
                io_depth: *io_depth,
                pattern: *pattern,
            })
            .collect()
    }
}
