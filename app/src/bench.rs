use std::path::Path;

use common::{
    bench::{LatencySource, Observation},
    config::{Settings, SweepConfig},
};
use eyre::Result;
use fio::Fio;
use indicatif::ProgressBar;
use latency_basic::LatencyBasic;
use tracing::debug;

use crate::Cli;

pub async fn run_benchmark(cli: &Cli) -> Result<()> {
    let settings = Settings {
        device: cli.filename.clone(),
    };
    let sweep = SweepConfig::default();
    let source = Fio::default();

    let progress = (!cli.no_progress).then(|| ProgressBar::new(sweep.runs().len() as u64));
    let observations = run_sweep(&source, &sweep, &settings, &cli.name, progress.as_ref()).await?;
    if let Some(progress) = &progress {
        progress.finish_and_clear();
    }

    LatencyBasic::default()
        .render(&observations, Path::new(&cli.output))
        .await?;
    println!("Chart written to {}", cli.output);
    Ok(())
}

/// Runs the full sweep strictly sequentially, one observation per run in
/// (depth ascending, pattern fixed-order) sequence. The first source error
/// aborts the sweep.
pub async fn run_sweep(
    source: &dyn LatencySource,
    sweep: &SweepConfig,
    settings: &Settings,
    name: &str,
    progress: Option<&ProgressBar>,
) -> Result<Vec<Observation>> {
    let runs = sweep.runs();
    debug!("Sweeping {} runs with {}", runs.len(), source.name());

    let mut observations = Vec::with_capacity(runs.len());
    for run in &runs {
        debug!(
            "source={} rw={} iodepth={}",
            source.name(),
            run.pattern,
            run.io_depth
        );
        let mean_latency_ms = source.mean_latency(settings, name, run).await?;
        observations.push(Observation {
            io_depth: run.io_depth,
            pattern: run.pattern,
            mean_latency_ms,
        });
        if let Some(progress) = progress {
            progress.inc(1);
        }
    }
    Ok(observations)
}
