use std::path::Path;

use eyre::{Context, Result, bail};
use serde::de::DeserializeOwned;
use tokio::{fs::read_to_string, process::Command};
use tracing::debug;

/// Runs a program to completion and returns its captured stdout. A spawn
/// failure or non-zero exit is an error; stderr is folded into the report.
pub async fn run_command(program: &str, args: &[String]) -> Result<String> {
    debug!("program={} args={}", program, args.join(" "));
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .context(format!("Run {program}"))?;

    if !output.status.success() {
        bail!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub async fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let contents = read_to_string(path)
        .await
        .context(format!("Read {}", path.display()))?;
    serde_json::from_str(&contents).context(format!("Parse {}", path.display()))
}
