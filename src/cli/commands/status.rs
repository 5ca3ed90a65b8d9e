use colored::Colorize;

use crate::cli::context::RunContext;
use crate::cli::output;
use crate::config::app_config::{AppConfig, ConfigSource};
use crate::core::errors::Result;
use crate::core::traits::crypto_backend::CryptoBackend;

use super::report_helpers::Completion;

/// Execute the `gpgbatch status` command.
///
/// Shows which gpg binary would be used, whether it runs, and where the
/// settings come from.
pub fn execute(ctx: &RunContext) -> Result<Completion> {
    output::header("gpgbatch status");

    println!("\n{}", "  Backend".bold());
    println!("  Name: {}", ctx.gpg.name());
    println!("  Path: {}", ctx.gpg.path().display().to_string().cyan());
    let sp = output::spinner(&format!("Checking {}...", ctx.gpg.name()));

    let completion = match ctx.gpg.version() {
        Some(v) => {
            output::finish_spinner(sp, &format!("Available: {v}"));
            Completion::Clean
        }
        None => {
            sp.finish_and_clear();
            output::warning("Not available: the binary could not be run");
            println!("  Install GnuPG or point to it with --gpg <path>.");
            Completion::WithFailures
        }
    };

    println!("\n{}", "  Settings".bold());
    println!("  Suffix: {}", ctx.suffix.cyan());
    println!(
        "  Fail fast: {}",
        if ctx.fail_fast { "yes" } else { "no" }
    );
    match &ctx.config_source {
        ConfigSource::File(path) => println!("  Config: {}", path.display()),
        ConfigSource::Defaults => {
            let hint = AppConfig::default_path()
                .map(|p| format!(" (create {} to change)", p.display()))
                .unwrap_or_default();
            println!("  Config: built-in defaults{hint}");
        }
    }

    Ok(completion)
}
