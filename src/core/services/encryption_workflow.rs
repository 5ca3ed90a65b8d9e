use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::batch_report::BatchReport;
use crate::core::models::passphrase::Passphrase;
use crate::core::models::target::{EncryptionTarget, Operation, validate_suffix};
use crate::core::services::batch_runner::{self, BatchHooks};
use crate::core::services::file_set_resolver;
use crate::core::traits::crypto_backend::CryptoBackend;

/// Encrypts every file of a directory with one passphrase.
///
/// Each ciphertext is written next to its plaintext as `<name><suffix>`.
/// Plaintext files are left in place.
pub struct EncryptionWorkflow<B: CryptoBackend> {
    pub backend: B,
    pub suffix: String,
}

impl<B: CryptoBackend> EncryptionWorkflow<B> {
    pub fn new(backend: B, suffix: impl Into<String>) -> Self {
        Self {
            backend,
            suffix: suffix.into(),
        }
    }

    /// Encrypt all files in `dir`.
    pub fn encrypt_all(&self, dir: &Path, passphrase: &Passphrase) -> Result<BatchReport> {
        self.encrypt_all_with(dir, passphrase, BatchHooks::default())
    }

    /// Encrypt all files in `dir`, reporting progress and honouring
    /// cancellation through `hooks`.
    ///
    /// Fails before touching any file when `dir` is not a directory, the
    /// suffix is unusable or the backend is missing. Per-file failures are
    /// recorded in the report.
    pub fn encrypt_all_with(
        &self,
        dir: &Path,
        passphrase: &Passphrase,
        hooks: BatchHooks<'_>,
    ) -> Result<BatchReport> {
        validate_suffix(&self.suffix)?;
        let inputs = file_set_resolver::resolve(dir, None)?;
        self.backend.ensure_available()?;

        let report = batch_runner::run_batch(
            Operation::Encrypt,
            inputs,
            |input| Ok(EncryptionTarget::for_encryption(input, &self.suffix)),
            |target, tmp| self.backend.encrypt_file(&target.input, tmp, passphrase),
            hooks,
        );

        let ciphertexts = file_set_resolver::resolve(dir, Some(&self.suffix))?;
        Ok(report.with_resulting_files(ciphertexts))
    }
}
