use std::sync::OnceLock;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

static VERBOSITY: OnceLock<Verbosity> = OnceLock::new();

/// Set the output level once at startup.
pub fn init(verbose: bool, quiet: bool) {
    let level = if quiet {
        Verbosity::Quiet
    } else if verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };
    let _ = VERBOSITY.set(level);
}

fn level() -> Verbosity {
    VERBOSITY.get().copied().unwrap_or(Verbosity::Normal)
}

pub fn is_quiet() -> bool {
    level() == Verbosity::Quiet
}

/// Print a success message.
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("  {} {}", "✓".green(), msg);
    }
}

/// Print a warning message.
pub fn warning(msg: &str) {
    if !is_quiet() {
        println!("  {} {}", "⚠".yellow(), msg);
    }
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    if !is_quiet() {
        println!("\n{}", msg.bold());
    }
}

/// Print a dimmed detail line, only with `--verbose`.
pub fn detail(msg: &str) {
    if level() == Verbosity::Verbose {
        println!("    {}", msg.dimmed());
    }
}

/// Start a spinner for a short setup step.
pub fn spinner(msg: &str) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }
    let sp = ProgressBar::new_spinner();
    sp.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    sp.set_message(msg.to_string());
    sp.enable_steady_tick(Duration::from_millis(80));
    sp
}

/// Stop a spinner and replace it with a success line.
pub fn finish_spinner(sp: ProgressBar, msg: &str) {
    sp.finish_and_clear();
    success(msg);
}

/// Progress bar over the files of a batch.
pub fn progress(len: usize, verb: &str) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("  {prefix} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar.set_prefix(verb.to_string());
    bar
}
