use common::{
    bench::{LatencySource, RunSpec},
    config::Settings,
    util::{read_json_file, run_command},
};
use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;


/// Fixed run parameters of the exerciser. The sweep varies only the access
/// pattern and queue depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fio {
    pub program: String,
    pub block_size: String,
    pub size: String,
    pub io_engine: String,
    pub direct: bool,
    pub num_jobs: usize,
}

impl Default for Fio {
    fn default() -> Self {
        Self {
            program: "fio".to_owned(),
            block_size: "4k".to_owned(),
            size: "1G".to_owned(),
            io_engine: "libaio".to_owned(),
            direct: true,
            num_jobs: 1,
        }
    }
}

fn int(item: bool) -> u8 {
    if item { 1 } else { 0 }
}

impl Fio {
    /// Report file for one run, distinguished by pattern and depth so runs
    /// at the same depth cannot overwrite each other.
    pub fn output_file(name: &str, run: &RunSpec) -> String {
        format!("{name}_{}_{}.json", run.pattern, run.io_depth)
    }

    pub fn args(&self, settings: &Settings, name: &str, run: &RunSpec) -> Vec<String> {
        vec![
            ("--name", name.to_owned()),
            ("--filename", settings.device.clone()),
            ("--ioengine", self.io_engine.clone()),
            ("--direct", int(self.direct).to_string()),
            ("--bs", self.block_size.clone()),
            ("--size", self.size.clone()),
            ("--numjobs", self.num_jobs.to_string()),
            ("--rw", run.pattern.to_string()),
            ("--iodepth", run.io_depth.to_string()),
            ("--output-format", "json".to_owned()),
            ("--output", Self::output_file(name, run)),
        ]
        .into_iter()
        .map(|(arg, value)| format!("{arg}={value}"))
        .collect()
    }
}

#[async_trait::async_trait]
impl LatencySource for Fio {
    fn name(&self) -> &'static str {
        "fio"
    }

    async fn mean_latency(&self, settings: &Settings, name: &str, run: &RunSpec) -> Result<f64> {
        let args = self.args(settings, name, run);
        run_command(&self.program, &args).await?;

        let report: result::FioReport = read_json_file(Self::output_file(name, run)).await?;
        let mean = report.mean_latency()?;
        debug!(
            "rw={} iodepth={} mean latency {mean} ms",
            run.pattern, run.io_depth
        );
        Ok(mean)
    }
}

#[cfg(test)]
mod tests {
    use common::bench::AccessPattern;

    use super::*;

    #[test]
    fn args_substitute_run_parameters() {
        let fio = Fio::default();
        let settings = Settings {
            device: "/dev/nvme0n1".to_owned(),
        };
        let run = RunSpec {
            io_depth: 17,
            pattern: AccessPattern::Randwrite,
        };
        let args = fio.args(&settings, "mytest", &run);

        for expected in [
            "--name=mytest",
            "--filename=/dev/nvme0n1",
            "--ioengine=libaio",
            "--direct=1",
            "--bs=4k",
            "--size=1G",
            "--numjobs=1",
            "--rw=randwrite",
            "--iodepth=17",
            "--output-format=json",
            "--output=mytest_randwrite_17.json",
        ] {
            assert!(args.iter().any(|arg| arg == expected), "missing {expected}");
        }
    }

    #[test]
    fn output_file_is_distinguished_by_pattern_and_depth() {
        let read = RunSpec {
            io_depth: 33,
            pattern: AccessPattern::Randread,
        };
        let write = RunSpec {
            io_depth: 33,
            pattern: AccessPattern::Randwrite,
        };
        assert_eq!(Fio::output_file("t", &read), "t_randread_33.json");
        assert_ne!(Fio::output_file("t", &read), Fio::output_file("t", &write));
    }
}
