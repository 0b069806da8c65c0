use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use clap::error::ErrorKind;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use jobfair_core::app::{BoardBuilder, ReportFormat, run_console};
use jobfair_core::config::{BoardConfig, DEFAULT_MANAGERS, DEFAULT_WORKERS_PER_MANAGER};
use jobfair_core::domain::JobFairError;

const USAGE: &str = "Usage: jobfair [managers workers_per_manager]";

#[derive(Parser, Debug)]
#[command(name = "jobfair")]
#[command(version)]
#[command(about = "Managers compete for jobs published from the console")]
struct Args {
    /// Number of managers
    #[arg(value_parser = clap::value_parser!(u32).range(1..), requires = "workers_per_manager")]
    managers: Option<u32>,

    /// Workers owned by each manager
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    workers_per_manager: Option<u32>,

    /// Length of one job-duration unit, in milliseconds
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    time_unit_ms: u64,

    /// Print the quit report as JSON lines
    #[arg(long)]
    json: bool,
}

/// What the process runs with after argument parsing.
#[derive(Debug)]
struct Settings {
    config: BoardConfig,
    format: ReportFormat,
    /// Set when the arguments were rejected and defaults were used instead.
    fallback: Option<String>,
}

impl Settings {
    fn defaults(reason: String) -> Self {
        Self {
            config: BoardConfig::default(),
            format: ReportFormat::Text,
            fallback: Some(reason),
        }
    }
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        let mut config = BoardConfig {
            time_unit: Duration::from_millis(args.time_unit_ms),
            ..BoardConfig::default()
        };
        // `requires` guarantees both or neither
        if let (Some(managers), Some(workers)) = (args.managers, args.workers_per_manager) {
            config.managers = managers as usize;
            config.workers_per_manager = workers as usize;
        }
        Self {
            config,
            format: if args.json {
                ReportFormat::Json
            } else {
                ReportFormat::Text
            },
            fallback: None,
        }
    }
}

/// Bad arguments never stop startup: fall back to the defaults.
/// `--help` and `--version` still print and exit.
fn resolve(parsed: Result<Args, clap::Error>) -> Settings {
    match parsed {
        Ok(args) => args.into(),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => Settings::defaults(
            e.kind()
                .as_str()
                .unwrap_or("invalid arguments")
                .to_string(),
        ),
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let settings = resolve(Args::try_parse());
    if let Some(reason) = &settings.fallback {
        tracing::warn!(
            reason = %reason,
            managers = DEFAULT_MANAGERS,
            workers_per_manager = DEFAULT_WORKERS_PER_MANAGER,
            "bad parameters, resorting to defaults"
        );
    }
    println!(
        "{USAGE}\nCreating {} managers with {} workers each.",
        settings.config.managers, settings.config.workers_per_manager
    );

    if !std::io::stdin().is_terminal() {
        tracing::error!(error = %JobFairError::ConsoleUnavailable, "cannot start");
        return ExitCode::from(2);
    }

    let board = match BoardBuilder::with_config(settings.config).build() {
        Ok(board) => board,
        Err(e) => {
            tracing::error!(error = %e, "cannot start");
            return ExitCode::FAILURE;
        }
    };

    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    match run_console(&board, input, &mut output, settings.format).await {
        // in-flight jobs are abandoned, not drained
        Ok(_) => std::process::exit(0),
        Err(e) => {
            tracing::error!(error = %e, "console failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings(argv: &[&str]) -> Settings {
        resolve(Args::try_parse_from(argv))
    }

    #[test]
    fn no_arguments_means_defaults_without_a_notice() {
        let s = settings(&["jobfair"]);
        assert!(s.fallback.is_none());
        assert_eq!(s.config.managers, 3);
        assert_eq!(s.config.workers_per_manager, 10);
        assert_eq!(s.config.time_unit, Duration::from_secs(1));
        assert_eq!(s.format, ReportFormat::Text);
    }

    #[test]
    fn both_counts_are_used() {
        let s = settings(&["jobfair", "5", "2"]);
        assert!(s.fallback.is_none());
        assert_eq!(s.config.managers, 5);
        assert_eq!(s.config.workers_per_manager, 2);
    }

    #[rstest]
    #[case::only_one(&["jobfair", "4"])]
    #[case::not_a_number(&["jobfair", "four", "2"])]
    #[case::zero(&["jobfair", "0", "2"])]
    #[case::negative(&["jobfair", "3", "-1"])]
    #[case::too_many(&["jobfair", "1", "2", "3"])]
    #[case::unknown_flag(&["jobfair", "--fast"])]
    fn bad_arguments_fall_back_to_defaults(#[case] argv: &[&str]) {
        let s = settings(argv);
        assert!(s.fallback.is_some());
        assert_eq!(s.config.managers, DEFAULT_MANAGERS);
        assert_eq!(s.config.workers_per_manager, DEFAULT_WORKERS_PER_MANAGER);
    }

    #[test]
    fn options_are_applied() {
        let s = settings(&["jobfair", "2", "2", "--time-unit-ms", "50", "--json"]);
        assert_eq!(s.config.time_unit, Duration::from_millis(50));
        assert_eq!(s.format, ReportFormat::Json);
    }
}
