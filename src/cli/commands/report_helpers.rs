use std::borrow::Cow;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::batch_report::BatchReport;
use crate::core::models::operation_result::OperationResult;
use crate::core::models::target::Operation;

/// How a command finished once setup succeeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Completion {
    /// Every file was processed successfully.
    Clean,
    /// At least one file failed or was cancelled.
    WithFailures,
}

impl Completion {
    fn from_success(ok: bool) -> Self {
        if ok { Self::Clean } else { Self::WithFailures }
    }
}

// Paths are rendered lossily so names that are not valid UTF-8 still appear.
#[derive(Serialize)]
struct ReportJson<'a> {
    operation: &'static str,
    path: Cow<'a, str>,
    generated_at: DateTime<Utc>,
    total: usize,
    succeeded: usize,
    failed: usize,
    cancelled: usize,
    results: Vec<ResultJson<'a>>,
    resulting_files: Vec<Cow<'a, str>>,
}

#[derive(Serialize)]
struct SingleJson<'a> {
    operation: &'static str,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    result: ResultJson<'a>,
}

#[derive(Serialize)]
struct ResultJson<'a> {
    input: Cow<'a, str>,
    output: Cow<'a, str>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a OperationResult> for ResultJson<'a> {
    fn from(r: &'a OperationResult) -> Self {
        Self {
            input: r.target.input.to_string_lossy(),
            output: r.target.output.to_string_lossy(),
            status: r.status_label(),
            error: r.error().map(|e| e.summary()),
        }
    }
}

/// Print a batch report, as JSON or as a colored summary followed by the
/// resulting file list.
pub fn print_report(report: &BatchReport, dir: &Path, json: bool) -> Result<Completion> {
    if json {
        let view = ReportJson {
            operation: report.operation.as_str(),
            path: dir.to_string_lossy(),
            generated_at: Utc::now(),
            total: report.total(),
            succeeded: report.succeeded,
            failed: report.failed,
            cancelled: report.cancelled,
            results: report.results.iter().map(ResultJson::from).collect(),
            resulting_files: report
                .resulting_files
                .iter()
                .map(|f| f.to_string_lossy())
                .collect(),
        };
        print_json(&view)?;
        return Ok(Completion::from_success(report.is_success()));
    }

    let verb = past_tense(report.operation);
    output::header(&format!(
        "{verb} {} of {} file(s) in {}",
        report.succeeded,
        report.total(),
        dir.display()
    ));

    for result in report.results.iter().filter(|r| !r.is_failure()) {
        print_result_line(result);
    }
    for failed in report.failures() {
        print_result_line(failed);
    }

    if report.cancelled > 0 {
        output::warning(&format!(
            "{} file(s) not processed after cancellation",
            report.cancelled
        ));
    }

    print_file_list(&report.resulting_files);
    Ok(Completion::from_success(report.is_success()))
}

/// Print the result of a single-file operation.
pub fn print_single(result: &OperationResult, json: bool) -> Result<Completion> {
    if json {
        print_json(&SingleJson {
            operation: Operation::Decrypt.as_str(),
            generated_at: Utc::now(),
            result: ResultJson::from(result),
        })?;
        return Ok(Completion::from_success(result.is_success()));
    }

    print_result_line(result);
    if result.is_success() {
        output::success(&format!("Decrypted {}", result.target.input.display()));
        print_file_list(std::slice::from_ref(&result.target.output));
    }
    Ok(Completion::from_success(result.is_success()))
}

fn print_result_line(result: &OperationResult) {
    let input = result.target.input.display();
    match result.error() {
        Some(_) => output::error(&failure_line(result)),
        None if result.is_cancelled() => output::detail(&format!("{input}: cancelled")),
        None => output::detail(&format!("{input} → {}", result.target.output.display())),
    }
}

/// Backend failures name the file and gpg's message; anything else never
/// reached the backend.
fn failure_line(result: &OperationResult) -> String {
    let input = result.target.input.display();
    match result.error() {
        Some(e) if e.is_per_file() => format!("{input}: {}", e.summary()),
        Some(e) => format!("{input}: skipped ({})", e.summary()),
        None => format!("{input}: {}", result.status_label()),
    }
}

/// The resulting files are printed even in quiet mode, one path per line.
fn print_file_list(files: &[PathBuf]) {
    if output::is_quiet() {
        for f in files {
            println!("{}", f.display());
        }
        return;
    }

    println!("\n  {}", format!("Files ({})", files.len()).bold());
    for f in files {
        println!("  {} {}", "•".dimmed(), f.display());
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{text}");
    Ok(())
}

fn past_tense(operation: Operation) -> &'static str {
    match operation {
        Operation::Encrypt => "Encrypted",
        Operation::Decrypt => "Decrypted",
    }
}
