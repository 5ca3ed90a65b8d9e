use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::passphrase::Passphrase;

/// Port for symmetric file encryption backends.
///
/// Implementations live in `adapters::cipher` (e.g. GpgBackend).
/// Workflows only depend on this trait, so they can be exercised without
/// spawning any external program.
pub trait CryptoBackend: Send + Sync {
    /// Encrypt `input` with `passphrase`, writing ciphertext to `output`.
    fn encrypt_file(&self, input: &Path, output: &Path, passphrase: &Passphrase) -> Result<()>;

    /// Decrypt `input` with `passphrase`, writing plaintext to `output`.
    ///
    /// A wrong passphrase or corrupt input is reported as
    /// `GpgBatchError::DecryptionFailed`.
    fn decrypt_file(&self, input: &Path, output: &Path, passphrase: &Passphrase) -> Result<()>;

    /// Fail with `GpgBatchError::BackendNotFound` when the backend cannot run.
    fn ensure_available(&self) -> Result<()>;

    /// Human-readable name of this backend (e.g. "gpg").
    fn name(&self) -> &str;
}
