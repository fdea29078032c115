use clap::Parser;
use eyre::Result;
use tracing::error;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod bench;

/// Sweeps fio over queue depths against a block device and charts mean
/// latency per access pattern via gnuplot.
#[derive(Parser)]
struct Cli {
    /// Test name, used to label fio jobs and their report files
    #[arg(short, long)]
    name: String,
    /// Target block device or file, at least 1 GiB
    #[arg(short, long)]
    filename: String,
    /// Path of the output PNG chart
    #[arg(short, long)]
    output: String,
    #[arg(long, default_value_t = false)]
    no_progress: bool,
    /// Extra log filter directives
    #[arg(short, long)]
    log: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let modules = ["common", "fio", "latency_basic"];
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let args = Cli::parse();
    let file_appender = tracing_appender::rolling::never(".", "log.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let mut env_filter = EnvFilter::new(format!("blklat={log_level}"));
    for module in modules {
        if !args.log.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }
    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(layer().with_writer(non_blocking))
        .init();

    if let Err(err) = bench::run_benchmark(&args).await {
        error!("{err:#?}");
        return Err(err);
    }
    Ok(())
}
