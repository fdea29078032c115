use std::path::Path;

use common::{
    bench::Observation,
    plot::{GnuplotJob, group_by_pattern, render_gnuplot},
};
use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Latency vs queue depth chart, one series per access pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyBasic {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for LatencyBasic {
    fn default() -> Self {
        Self {
            title: "Latency vs I/O Depth".to_owned(),
            x_label: "I/O Depth".to_owned(),
            y_label: "Latency (ms)".to_owned(),
        }
    }
}

impl LatencyBasic {
    pub async fn render(&self, observations: &[Observation], output: &Path) -> Result<()> {
        let series = group_by_pattern(observations);
        debug!(
            "Rendering {} series ({} observations) to {}",
            series.len(),
            observations.len(),
            output.display()
        );

        render_gnuplot(&GnuplotJob {
            output,
            title: &self.title,
            x_label: &self.x_label,
            y_label: &self.y_label,
            series,
        })
        .await
    }
}
