use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::core::errors::{GpgBatchError, Result};

/// A symmetric passphrase held in zeroizing memory.
///
/// The value is only ever handed to a backend's stdin; `Debug` is redacted
/// and there is no `Display` impl.
pub struct Passphrase(SecretString);

impl Passphrase {
    /// Wrap a passphrase, rejecting empty input and line breaks.
    ///
    /// Backends read the passphrase as a single line, so anything after a
    /// newline would be dropped.
    pub fn new(value: String) -> Result<Self> {
        if value.is_empty() {
            return Err(GpgBatchError::PassphraseUnavailable {
                detail: "the passphrase is empty".into(),
            });
        }
        if value.contains(['\n', '\r']) {
            return Err(GpgBatchError::PassphraseUnavailable {
                detail: "the passphrase contains a line break".into(),
            });
        }
        Ok(Self(SecretString::from(value)))
    }

    /// Borrow the cleartext for the duration of a backend call.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase([REDACTED])")
    }
}
