use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use nanostat::convert::{convert_batch, convert_one};
use nanostat::output;
use nanostat::settings::{validate_version, Settings};

#[derive(Parser)]
#[command(
    name = "nanostat",
    version,
    about = "Extract run statistics from a MinKNOW HTML run report",
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// HTML run report
    #[arg(required = true)]
    report: Option<PathBuf>,

    /// JSON output (default: REPORT with a .json extension)
    output: Option<PathBuf>,

    /// Also print the JSON to stdout
    #[arg(long)]
    print: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(clap::Args)]
struct CommonArgs {
    /// Settings file (default: ./nanostat.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Accept reports from any MinKNOW version
    #[arg(long, global = true)]
    no_version_check: bool,

    /// MinKNOW version to require instead of the pinned one
    #[arg(long, value_name = "X.Y.Z", global = true, value_parser = validate_version)]
    expect_version: Option<String>,

    /// Write single-line JSON
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert many reports in parallel
    Batch {
        #[arg(required = true)]
        reports: Vec<PathBuf>,
        /// Directory for the JSON files (default: next to each report)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load(cli.common.config.as_deref()).context("loading settings")?;
    let mut opts = settings.extract_options();
    if cli.common.no_version_check {
        opts.check_version = false;
    }
    if let Some(v) = &cli.common.expect_version {
        opts.expected_version = Some(v.clone());
    }
    let pretty = settings.pretty && !cli.common.compact;

    let result = match cli.command {
        Some(Commands::Batch { reports, out_dir }) => {
            if let Some(dir) = &out_dir {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
            let outcome = convert_batch(&reports, out_dir.as_deref(), &opts, pretty);
            println!("Converted {} of {} reports.", outcome.converted(), outcome.total());
            if outcome.failed() > 0 {
                bail!("{} report(s) failed", outcome.failed());
            }
            Ok(())
        }
        None => {
            let report = cli.report.context("missing REPORT argument")?;
            let output = cli
                .output
                .unwrap_or_else(|| output::default_output_path(&report));
            let data = convert_one(&report, &output, &opts, pretty)?;
            if cli.print {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&data)?;
                writeln!(stdout)?;
            }
            println!("Successfully created {}", output.display());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("Done in {:.1}s", elapsed.as_secs_f64());
    }

    result
}
