//! wgstat - work-group statistics over a temperature record file
//!
//! Loads a dataset, asks for a bin count if none was given, then prints the
//! maximum, minimum, mean and histogram computed on the selected backend.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{error, info};
use wgstat::config::{DEFAULT_WORKGROUP_SIZE, StatsConfig};
use wgstat::dataset::Dataset;
use wgstat::ops::StatisticalOps;
use wgstat::runtime::cpu::{CpuDevice, CpuRuntime};
use wgstat::runtime::{Device, Runtime, RuntimeClient};
use wgstat::summary::Summary;

/// wgstat - work-group tree reductions and atomic histograms
#[derive(Parser)]
#[command(
    name = "wgstat",
    version,
    about = "Max, min, mean and histogram of a dataset via work-group reductions",
    after_help = r#"
Environment Variables:
  WGSTAT_INPUT=<path>          Dataset file
  WGSTAT_BINS=<n>              Number of histogram bins
  WGSTAT_WORKGROUP_SIZE=<n>    Lanes per work-group (power of two, <= 256)
  WGSTAT_BACKEND=cpu|wgpu      Compute backend
  WGSTAT_PLATFORM=<name>       WebGPU platform filter (all, vulkan, metal, dx12, gl)
  WGSTAT_DEVICE=<index>        Adapter index within the platform
  WGSTAT_LOG_LEVEL=debug       Set log level (error, warn, info, debug, trace)
"#
)]
struct Cli {
    /// Dataset file, one `location year month day time temperature` record per line
    #[arg(
        short,
        long,
        env = "WGSTAT_INPUT",
        default_value = "temp_lincolnshire_short.txt"
    )]
    input: PathBuf,

    /// Number of histogram bins (prompted for on stdin when omitted)
    #[arg(short, long, env = "WGSTAT_BINS")]
    bins: Option<usize>,

    /// Lanes per work-group
    #[arg(
        short,
        long,
        env = "WGSTAT_WORKGROUP_SIZE",
        default_value_t = DEFAULT_WORKGROUP_SIZE
    )]
    workgroup_size: u32,

    /// Compute backend (defaults to wgpu when compiled in)
    #[arg(long, value_enum, env = "WGSTAT_BACKEND")]
    backend: Option<BackendKind>,

    /// WebGPU platform filter
    #[arg(short, long, env = "WGSTAT_PLATFORM", default_value = "all")]
    platform: String,

    /// Adapter index within the selected platform
    #[arg(short, long, env = "WGSTAT_DEVICE", default_value_t = 0)]
    device: usize,

    /// List available devices and exit
    #[arg(short, long)]
    list: bool,

    /// Set log level
    #[arg(long, value_enum, env = "WGSTAT_LOG_LEVEL", default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    Cpu,
    Wgpu,
}

impl BackendKind {
    fn default_for_build() -> Self {
        if cfg!(feature = "wgpu") {
            BackendKind::Wgpu
        } else {
            BackendKind::Cpu
        }
    }
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .filter_level(cli.log_level.clone().into())
        .init();

    let backend = cli.backend.unwrap_or_else(BackendKind::default_for_build);

    if cli.list {
        return list_devices(backend, &cli.platform);
    }

    let dataset = Dataset::load(&cli.input)
        .with_context(|| format!("failed to load dataset from {}", cli.input.display()))?;
    println!("File Size: {}", dataset.len());

    let bins = match cli.bins {
        Some(bins) => bins,
        None => prompt_bins(io::stdin().lock(), io::stdout().lock())?,
    };

    let config = StatsConfig::new(bins).with_workgroup_size(cli.workgroup_size);
    config.validate().context("invalid configuration")?;

    let summary = match backend {
        BackendKind::Cpu => run::<CpuRuntime>(CpuDevice::new(), &dataset, &config),
        BackendKind::Wgpu => run_wgpu(&cli.platform, cli.device, &dataset, &config),
    }
    .inspect_err(|e| error!("statistics run failed: {e:#}"))?;

    println!("{summary}");
    Ok(())
}

/// Open `device`, print the banner and run the statistics pipeline.
fn run<R: Runtime>(device: R::Device, dataset: &Dataset, config: &StatsConfig) -> Result<Summary>
where
    R::Client: StatisticalOps,
{
    let client = R::default_client(&device)
        .with_context(|| format!("failed to open {} device {}", R::name(), device.id()))?;
    println!("Running on {}", client.device().name());
    info!(
        "{} elements, {} bins, work-groups of {}",
        dataset.len(),
        config.bins,
        config.workgroup_size
    );
    Ok(client.summarize(dataset, config)?)
}

#[cfg(feature = "wgpu")]
fn run_wgpu(
    platform: &str,
    index: usize,
    dataset: &Dataset,
    config: &StatsConfig,
) -> Result<Summary> {
    use wgstat::runtime::wgpu::{WgpuDevice, WgpuRuntime, parse_backends};

    let backends = parse_backends(platform)
        .with_context(|| format!("unknown platform '{platform}'"))?;
    run::<WgpuRuntime>(WgpuDevice::with_backends(index, backends), dataset, config)
}

#[cfg(not(feature = "wgpu"))]
fn run_wgpu(_: &str, _: usize, _: &Dataset, _: &StatsConfig) -> Result<Summary> {
    bail!("wgstat was built without the `wgpu` feature; use --backend cpu")
}

fn list_devices(backend: BackendKind, platform: &str) -> Result<()> {
    match backend {
        BackendKind::Cpu => {
            let device = CpuDevice::new();
            println!("0: {} ({} threads)", device.name(), device.parallelism());
            Ok(())
        }
        BackendKind::Wgpu => list_wgpu_devices(platform),
    }
}

#[cfg(feature = "wgpu")]
fn list_wgpu_devices(platform: &str) -> Result<()> {
    use wgstat::runtime::wgpu::{list_adapters, parse_backends};

    let backends = parse_backends(platform)
        .with_context(|| format!("unknown platform '{platform}'"))?;
    let adapters = list_adapters(backends);
    if adapters.is_empty() {
        bail!("no WebGPU adapters found for platform '{platform}'");
    }
    for adapter in adapters {
        println!("{adapter}");
    }
    Ok(())
}

#[cfg(not(feature = "wgpu"))]
fn list_wgpu_devices(_: &str) -> Result<()> {
    bail!("wgstat was built without the `wgpu` feature; use --backend cpu")
}

/// Ask for the bin count on `output` and read it from `input`.
fn prompt_bins(mut input: impl BufRead, mut output: impl Write) -> Result<usize> {
    writeln!(output, "Please enter the number of Bins for the Histogram")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("no bin count given on stdin");
    }
    let bins: usize = line
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a valid bin count", line.trim()))?;

    writeln!(output, "You Entered: {bins}")?;
    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_bins_echoes() {
        let mut out = Vec::new();
        let bins = prompt_bins(Cursor::new("12\n"), &mut out).unwrap();
        assert_eq!(bins, 12);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Please enter the number of Bins for the Histogram\n"));
        assert!(text.ends_with("You Entered: 12\n"));
    }

    #[test]
    fn test_prompt_bins_rejects_garbage() {
        assert!(prompt_bins(Cursor::new("ten\n"), Vec::new()).is_err());
        assert!(prompt_bins(Cursor::new(""), Vec::new()).is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["wgstat"]);
        assert_eq!(cli.workgroup_size, 32);
        assert_eq!(cli.platform, "all");
        assert_eq!(cli.device, 0);
        assert!(cli.bins.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "wgstat", "-i", "data.txt", "-b", "5", "-w", "64", "--backend", "cpu",
        ]);
        assert_eq!(cli.input, PathBuf::from("data.txt"));
        assert_eq!(cli.bins, Some(5));
        assert_eq!(cli.workgroup_size, 64);
        assert_eq!(cli.backend, Some(BackendKind::Cpu));
    }
}
