use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use rainfall_archive::app::{App, FetchReport, FetchRequest, ProgressEvent, ProgressSink};
use rainfall_archive::domain::Identifiers;
use rainfall_archive::error::RainfallError;
use rainfall_archive::metadata::MetadataHttpClient;
use rainfall_archive::s3::S3HttpClient;

/// Download 3RWW's calibrated 15-minute rainfall archive by pixel/gauge and
/// date range. When no pixel or gauge ids are given, the full list is
/// resolved from the 3RWW metadata API.
#[derive(Parser)]
#[command(name = "rainfall-archive")]
#[command(version, author)]
struct Cli {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start: String,

    /// End date (YYYY-MM-DD); its whole month is included
    #[arg(long)]
    end: String,

    /// Pixel ids to download (multiple allowed; omit to download all)
    #[arg(long, num_args = 0.., value_name = "ID")]
    pixels: Vec<String>,

    /// Gauge ids to download (multiple allowed; omit to download all)
    #[arg(long, num_args = 0.., value_name = "ID")]
    gauges: Vec<String>,

    /// Destination folder
    #[arg(long, default_value = ".")]
    out: Utf8PathBuf,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(rainfall) = report.downcast_ref::<RainfallError>() {
            return ExitCode::from(map_exit_code(rainfall));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &RainfallError) -> u8 {
    match error {
        RainfallError::InvalidDate(_) => 2,
        RainfallError::MetadataHttp(_)
        | RainfallError::MetadataStatus { .. }
        | RainfallError::MalformedMetadata(_)
        | RainfallError::StoreHttp(_)
        | RainfallError::StoreStatus { .. } => 3,
        RainfallError::Filesystem(_) => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let metadata = MetadataHttpClient::new().into_diagnostic()?;
    let store = S3HttpClient::new().into_diagnostic()?;
    let app = App::new(metadata, store);

    let request = FetchRequest {
        start: cli.start,
        end: cli.end,
        pixels: Identifiers::from_cli(cli.pixels),
        gauges: Identifiers::from_cli(cli.gauges),
        dest: cli.out,
    };

    let report = app.fetch(&request, &ConsoleSink).into_diagnostic()?;
    print_summary(&report);
    Ok(())
}

struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn event(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Downloaded { path } => println!("✅ Downloaded {path}"),
            ProgressEvent::Missing { key } => println!("⚠️ File not found: {key}"),
        }
    }
}

fn print_summary(report: &FetchReport) {
    let green = "\x1b[32m";
    let yellow = "\x1b[33m";
    let reset = "\x1b[0m";

    println!("{green}✅ Downloaded files: {}{reset}", report.downloaded.len());
    if !report.missing.is_empty() {
        println!("{yellow}⚠️ Missing remote files: {}{reset}", report.missing.len());
    }
}
