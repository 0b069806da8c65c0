//! Console - the line-oriented command loop.
//!
//! Generic over reader and writer so tests can script a session.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::builder::JobBoard;
use super::status::ManagerReport;
use crate::domain::{JobFairError, Result};

pub const PROMPT: &str = "Enter the number of jobs you wish to create and hit <Enter>.\n\
You may add jobs at any time, even as console is scrolling.\n\
Type \"quit\" and hit <Enter> to terminate program and view stats.\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateJobs(i64),
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            return Command::Quit;
        }
        match line.parse::<i64>() {
            Ok(count) => Command::CreateJobs(count),
            Err(_) => Command::Unknown(line.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Read commands until `quit` or end of input, then write the per-manager
/// report and return it. The caller decides how to exit.
pub async fn run_console<R, W>(
    board: &JobBoard,
    mut input: R,
    output: &mut W,
    format: ReportFormat,
) -> Result<Vec<ManagerReport>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            tracing::info!("console closed");
            break;
        }

        match Command::parse(&line) {
            Command::Quit => break,
            Command::CreateJobs(count) => match board.create_jobs(count) {
                Ok(_) => {}
                Err(JobFairError::InvalidJobCount(count)) => {
                    tracing::warn!(count, "job count must be positive");
                    output
                        .write_all(b"The number of jobs must be positive.\n")
                        .await?;
                }
                Err(e) => return Err(e),
            },
            Command::Unknown(text) => {
                tracing::info!(input = %text, "unknown input");
            }
        }
    }

    let reports = board.report();
    write_report(&reports, output, format).await?;
    Ok(reports)
}

async fn write_report<W>(reports: &[ManagerReport], output: &mut W, format: ReportFormat) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    for report in reports {
        let line = match format {
            ReportFormat::Text => report.to_string(),
            ReportFormat::Json => serde_json::to_string(report).map_err(std::io::Error::from)?,
        };
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(())
}
