use std::path::Path;

use super::passphrase_helpers;
use super::report_helpers::{self, Completion};
use crate::cli::context::RunContext;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::crypto_backend::CryptoBackend;
use crate::core::services::decryption_workflow::DecryptionWorkflow;

/// Execute the `gpgbatch decrypt-file` command.
///
/// Only a suffix given with `--suffix` (or `GPGBATCH_SUFFIX`) is used;
/// otherwise the file's own extension is stripped.
pub fn execute(
    ctx: RunContext,
    file: &Path,
    passphrase: Option<String>,
    explicit_suffix: Option<&str>,
) -> Result<Completion> {
    let passphrase = passphrase_helpers::resolve(passphrase, false)?;
    let json = ctx.json;

    output::detail(&format!("Backend: {} ({})", ctx.gpg.name(), ctx.gpg.path().display()));
    let workflow = DecryptionWorkflow::new(ctx.gpg, ctx.suffix);

    let sp = if json {
        indicatif::ProgressBar::hidden()
    } else {
        output::spinner(&format!("Decrypting {}...", file.display()))
    };
    let result = workflow.decrypt_one(file, &passphrase, explicit_suffix);
    sp.finish_and_clear();

    report_helpers::print_single(&result?, json)
}
