use std::path::Path;

use super::batch_helpers;
use super::passphrase_helpers;
use super::report_helpers::{self, Completion};
use crate::cli::context::RunContext;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::crypto_backend::CryptoBackend;
use crate::core::services::encryption_workflow::EncryptionWorkflow;
use crate::core::services::file_set_resolver;

/// Execute the `gpgbatch encrypt` command.
///
/// Encrypts every file in `dir`, writing `<name><suffix>` next to each
/// original. Originals are kept.
pub fn execute(
    ctx: RunContext,
    dir: &Path,
    passphrase: Option<String>,
    fail_fast: bool,
) -> Result<Completion> {
    file_set_resolver::ensure_directory(dir)?;
    let passphrase = passphrase_helpers::resolve(passphrase, true)?;

    let RunContext {
        gpg,
        suffix,
        fail_fast: config_fail_fast,
        json,
        ..
    } = ctx;

    output::detail(&format!("Backend: {} ({})", gpg.name(), gpg.path().display()));
    output::detail(&format!("Suffix: {suffix}"));

    let workflow = EncryptionWorkflow::new(gpg, suffix);
    let report = batch_helpers::with_progress(
        dir,
        None,
        "Encrypting",
        fail_fast || config_fail_fast,
        json,
        |hooks| workflow.encrypt_all_with(dir, &passphrase, hooks),
    )?;

    report_helpers::print_report(&report, dir, json)
}
