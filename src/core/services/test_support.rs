use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::errors::{GpgBatchError, Result};
use crate::core::models::passphrase::Passphrase;
use crate::core::traits::crypto_backend::CryptoBackend;

const MAGIC: &str = "FAKE-CIPHERTEXT";

/// In-process backend for workflow tests.
///
/// "Ciphertext" is a header line carrying the passphrase followed by the
/// original bytes, so round trips are byte-exact and wrong passphrases are
/// detectable.
pub struct FakeBackend {
    calls: AtomicUsize,
    fail_names: Vec<String>,
    available: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_names: Vec::new(),
            available: true,
        }
    }

    /// Make every invocation on a file with this name exit with an error.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.fail_names.push(name.to_string());
        self
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Number of encrypt/decrypt invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self, input: &Path) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = input.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if self.fail_names.iter().any(|f| f == name) {
            return Err(GpgBatchError::BackendInvocation {
                path: input.to_path_buf(),
                detail: "simulated exit status 2".into(),
            });
        }
        Ok(())
    }

    fn header(passphrase: &Passphrase) -> Vec<u8> {
        format!("{MAGIC}:{}\n", passphrase.expose()).into_bytes()
    }
}

impl CryptoBackend for FakeBackend {
    fn encrypt_file(&self, input: &Path, output: &Path, passphrase: &Passphrase) -> Result<()> {
        self.record(input)?;
        let mut data = Self::header(passphrase);
        data.extend(fs::read(input)?);
        fs::write(output, data)?;
        Ok(())
    }

    fn decrypt_file(&self, input: &Path, output: &Path, passphrase: &Passphrase) -> Result<()> {
        self.record(input)?;
        let data = fs::read(input)?;
        let header = Self::header(passphrase);
        match data.strip_prefix(header.as_slice()) {
            Some(plain) => {
                fs::write(output, plain)?;
                Ok(())
            }
            None => Err(GpgBatchError::DecryptionFailed {
                path: input.to_path_buf(),
                detail: "bad passphrase".into(),
            }),
        }
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(GpgBatchError::BackendNotFound {
                path: "fake".into(),
                detail: "fake backend disabled".into(),
            })
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

pub fn passphrase(value: &str) -> Passphrase {
    Passphrase::new(value.to_string()).unwrap()
}
