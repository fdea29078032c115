use std::path::Path;

use eyre::{Context, Result};
use tokio::fs::write;
use tracing::debug;

use crate::{
    bench::{AccessPattern, Observation},
    util::run_command,
};

/// Scratch files shared by every invocation in the working directory.
/// Overwritten each run; concurrent runs in one directory would race.
pub const DATA_FILE: &str = "latency_data.txt";
pub const SCRIPT_FILE: &str = "plot_commands.gp";

pub struct GnuplotJob<'a> {
    pub output: &'a Path,
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub series: Vec<(AccessPattern, Vec<(usize, f64)>)>,
}

/// Groups observations by access pattern, first-seen order, preserving
/// insertion order within each series.
pub fn group_by_pattern(observations: &[Observation]) -> Vec<(AccessPattern, Vec<(usize, f64)>)> {
    let mut series: Vec<(AccessPattern, Vec<(usize, f64)>)> = Vec::new();
    for obs in observations {
        let point = (obs.io_depth, obs.mean_latency_ms);
        match series.iter_mut().find(|(pattern, _)| *pattern == obs.pattern) {
            Some((_, points)) => points.push(point),
            None => series.push((obs.pattern, vec![point])),
        }
    }
    series
}

/// One row per observation: `depth latency pattern`, rows grouped by series.
pub fn series_file_contents(series: &[(AccessPattern, Vec<(usize, f64)>)]) -> String {
    let mut contents = String::new();
    for (pattern, points) in series {
        for (io_depth, latency) in points {
            contents.push_str(&format!("{io_depth} {latency} {pattern}\n"));
        }
    }
    contents
}

/// A PNG-terminal gnuplot script with one linespoints clause per series,
/// each filtering the shared data file on its pattern column.
pub fn script_contents(job: &GnuplotJob<'_>) -> String {
    let clauses = job
        .series
        .iter()
        .enumerate()
        .map(|(idx, (pattern, _))| {
            let source = if idx == 0 {
                format!("'{DATA_FILE}'")
            } else {
                "''".to_owned()
            };
            format!(
                "{source} using 1:(strcol(3) eq '{pattern}' ? $2 : 1/0) title '{pattern}' with linespoints"
            )
        })
        .collect::<Vec<_>>();

    format!(
        "set terminal png\n\
         set output '{}'\n\
         set title '{}'\n\
         set xlabel '{}'\n\
         set ylabel '{}'\n\
         plot {}\n",
        job.output.display(),
        job.title,
        job.x_label,
        job.y_label,
        clauses.join(", \\\n     ")
    )
}

pub async fn render_gnuplot(job: &GnuplotJob<'_>) -> Result<()> {
    if job.series.is_empty() {
        debug!("No series to plot");
        return Ok(());
    }

    write(DATA_FILE, series_file_contents(&job.series))
        .await
        .context("Write series data file")?;
    write(SCRIPT_FILE, script_contents(job))
        .await
        .context("Write gnuplot script")?;
    run_command("gnuplot", &[SCRIPT_FILE.to_owned()]).await?;
    Ok(())
}
