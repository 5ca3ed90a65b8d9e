use std::path::Path;

use crate::core::errors::{GpgBatchError, Result};
use crate::core::models::batch_report::BatchReport;
use crate::core::models::operation_result::OperationResult;
use crate::core::models::passphrase::Passphrase;
use crate::core::models::target::{EncryptionTarget, Operation, validate_suffix};
use crate::core::services::batch_runner::{self, BatchHooks};
use crate::core::services::file_set_resolver;
use crate::core::traits::crypto_backend::CryptoBackend;

/// Decrypts suffixed files back to their original names.
///
/// The output path of `x<suffix>` is always `x`: the suffix is removed only
/// on an exact trailing match.
pub struct DecryptionWorkflow<B: CryptoBackend> {
    pub backend: B,
    /// Suffix used by `decrypt_all` to pick candidates.
    pub suffix: String,
}

impl<B: CryptoBackend> DecryptionWorkflow<B> {
    pub fn new(backend: B, suffix: impl Into<String>) -> Self {
        Self {
            backend,
            suffix: suffix.into(),
        }
    }

    /// Decrypt every file in `dir` whose name ends with the suffix.
    pub fn decrypt_all(&self, dir: &Path, passphrase: &Passphrase) -> Result<BatchReport> {
        self.decrypt_all_with(dir, passphrase, BatchHooks::default())
    }

    /// Batch decryption with progress and cancellation hooks.
    ///
    /// The report's `resulting_files` lists every file left in `dir` that
    /// does not carry the suffix.
    pub fn decrypt_all_with(
        &self,
        dir: &Path,
        passphrase: &Passphrase,
        hooks: BatchHooks<'_>,
    ) -> Result<BatchReport> {
        validate_suffix(&self.suffix)?;
        let inputs = file_set_resolver::resolve(dir, Some(&self.suffix))?;
        self.backend.ensure_available()?;

        let report = batch_runner::run_batch(
            Operation::Decrypt,
            inputs,
            |input| EncryptionTarget::for_decryption(input, &self.suffix),
            |target, tmp| self.backend.decrypt_file(&target.input, tmp, passphrase),
            hooks,
        );

        let plaintexts = file_set_resolver::resolve_excluding(dir, &self.suffix)?;
        Ok(report.with_resulting_files(plaintexts))
    }

    /// Decrypt a single file.
    ///
    /// The suffix to strip is `suffix` when given, otherwise the file's own
    /// extension (`report.pdf.gpg` → `.gpg`). Path and suffix problems are
    /// returned as errors; a backend failure comes back as a failed
    /// `OperationResult`.
    pub fn decrypt_one(
        &self,
        file: &Path,
        passphrase: &Passphrase,
        suffix: Option<&str>,
    ) -> Result<OperationResult> {
        if !file.is_file() {
            return Err(GpgBatchError::InvalidPath {
                path: file.to_path_buf(),
                reason: if file.exists() {
                    "Path is not a regular file".into()
                } else {
                    "File does not exist".into()
                },
            });
        }

        let suffix = match suffix {
            Some(s) => s.to_string(),
            None => extension_suffix(file)?,
        };
        validate_suffix(&suffix)?;

        let target = EncryptionTarget::for_decryption(file, &suffix)?;
        self.backend.ensure_available()?;

        let outcome = batch_runner::write_atomically(&target.input, &target.output, |tmp| {
            self.backend.decrypt_file(&target.input, tmp, passphrase)
        });

        Ok(match outcome {
            Ok(()) => OperationResult::succeeded(target),
            Err(e) => OperationResult::failed(target, e),
        })
    }
}

/// `.` followed by the file's extension.
fn extension_suffix(file: &Path) -> Result<String> {
    file.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{e}"))
        .ok_or_else(|| GpgBatchError::InvalidPath {
            path: file.to_path_buf(),
            reason: "File has no extension to strip; pass --suffix explicitly".into(),
        })
}
