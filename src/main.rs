//! semtest: Semantic Test Validator CLI

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use semtest::reporter::{ConsoleReporter, JsonReporter, OutputFormat};
use semtest::USAGE_EXIT_CODE;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Validate that contract/integration tests are semantically meaningful
///
/// Exit codes: 0 = all checks passed, 1 = critical issues found,
/// 2 = warnings found (can proceed) or invalid invocation.
#[derive(Parser, Debug)]
#[command(name = "semtest")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Test file to validate
    path: PathBuf,

    /// Output format: json or text (any other value, or none, means text)
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "text",
        num_args = 0..=1,
        default_missing_value = "text"
    )]
    format: String,

    /// Path to config file (default: search .semtestrc.json next to the file and upward)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(USAGE_EXIT_CODE)
        }
    }
}

/// Diagnostics go to stderr; stdout carries only the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SEMTEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if args.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let format = OutputFormat::parse_lenient(&args.format);
    tracing::debug!(file = %args.path.display(), ?format, "validating");

    let result = semtest::analyze_file(&args.path, args.config.as_deref())?;

    match format {
        OutputFormat::Json => {
            println!("{}", JsonReporter::new().pretty().report(&result));
        }
        OutputFormat::Text => {
            let mut reporter = ConsoleReporter::new();
            if args.no_color {
                reporter = reporter.without_colors();
            }
            reporter.report(&result);
        }
    }

    let verdict = result.verdict();
    tracing::debug!(
        critical = result.critical_count(),
        warnings = result.warning_count(),
        info = result.info_count(),
        ?verdict,
        "done"
    );
    Ok(ExitCode::from(verdict.exit_code()))
}
