use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use regex::Regex;

use crate::core::errors::{GpgBatchError, Result};
use crate::core::models::passphrase::Passphrase;
use crate::core::traits::crypto_backend::CryptoBackend;

/// GPG backend that shells out to the `gpg` binary for symmetric
/// (passphrase-only) encryption.
///
/// The passphrase is fed through stdin (`--passphrase-fd 0`) so it never
/// shows up in the process list.
pub struct GpgBackend {
    /// Path to the gpg binary (defaults to "gpg").
    gpg_path: PathBuf,
    /// Extra options placed before the command, e.g. `--cipher-algo AES256`.
    extra_args: Vec<String>,
}

/// Which gpg command to run.
#[derive(Clone, Copy)]
enum Mode {
    Symmetric,
    Decrypt,
}

impl Mode {
    fn flag(self) -> &'static str {
        match self {
            Self::Symmetric => "--symmetric",
            Self::Decrypt => "--decrypt",
        }
    }
}

impl GpgBackend {
    /// Create a new backend using the default `gpg` binary.
    pub fn new() -> Self {
        Self::with_path(PathBuf::from("gpg"))
    }

    /// Create a new backend with a custom gpg binary path.
    pub fn with_path(gpg_path: PathBuf) -> Self {
        Self {
            gpg_path,
            extra_args: Vec::new(),
        }
    }

    /// Append options to every invocation.
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn path(&self) -> &Path {
        &self.gpg_path
    }

    /// First line of `gpg --version`, if the binary runs.
    pub fn version(&self) -> Option<String> {
        let output = Command::new(&self.gpg_path)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .map(|l| l.trim().to_string())
    }

    /// Full argument list for one invocation.
    fn build_args(&self, mode: Mode, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "--batch",
            "--yes",
            "--quiet",
            "--pinentry-mode",
            "loopback",
            "--passphrase-fd",
            "0",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        args.extend(self.extra_args.iter().map(OsString::from));
        args.push("--output".into());
        args.push(output.as_os_str().to_os_string());
        args.push(mode.flag().into());
        args.push(input.as_os_str().to_os_string());
        args
    }

    /// Run gpg on one file, writing the passphrase to its stdin.
    fn run_gpg(&self, mode: Mode, input: &Path, output: &Path, passphrase: &Passphrase) -> Result<()> {
        let invocation_error = |detail: String| GpgBatchError::BackendInvocation {
            path: input.to_path_buf(),
            detail,
        };

        let mut child = Command::new(&self.gpg_path)
            .args(self.build_args(mode, input, output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| invocation_error(format!("Failed to run gpg: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            // gpg may exit before reading stdin; its stderr explains why.
            let _ = stdin
                .write_all(passphrase.expose().as_bytes())
                .and_then(|()| stdin.write_all(b"\n"));
        }

        let result = child
            .wait_with_output()
            .map_err(|e| invocation_error(format!("gpg process failed: {e}")))?;

        if result.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            format!("gpg exited with {}", result.status)
        } else {
            stderr
        };

        match mode {
            Mode::Decrypt if is_decryption_failure(&detail) => Err(GpgBatchError::DecryptionFailed {
                path: input.to_path_buf(),
                detail,
            }),
            _ => Err(invocation_error(detail)),
        }
    }
}

impl Default for GpgBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether gpg's stderr says the passphrase or ciphertext was bad.
fn is_decryption_failure(stderr: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"(?i)bad passphrase|bad session key|decryption failed|no valid openpgp data",
            )
            .ok()
        })
        .as_ref()
        .is_some_and(|re| re.is_match(stderr))
}

impl CryptoBackend for GpgBackend {
    fn encrypt_file(&self, input: &Path, output: &Path, passphrase: &Passphrase) -> Result<()> {
        self.run_gpg(Mode::Symmetric, input, output, passphrase)
    }

    fn decrypt_file(&self, input: &Path, output: &Path, passphrase: &Passphrase) -> Result<()> {
        self.run_gpg(Mode::Decrypt, input, output, passphrase)
    }

    fn ensure_available(&self) -> Result<()> {
        let not_found = |detail: String| GpgBatchError::BackendNotFound {
            path: self.gpg_path.clone(),
            detail,
        };

        match Command::new(&self.gpg_path)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(not_found(format!("'--version' exited with {status}"))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(not_found("No such file or not in PATH".into()))
            }
            Err(e) => Err(not_found(format!("Could not start it: {e}"))),
        }
    }

    fn name(&self) -> &str {
        "gpg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpg_backend_has_correct_name() {
        let backend = GpgBackend::new();
        assert_eq!(backend.name(), "gpg");
        assert_eq!(backend.path(), Path::new("gpg"));
    }

    #[test]
    fn encrypt_args_put_passphrase_on_stdin_only() {
        let backend = GpgBackend::new();
        let args = backend.build_args(Mode::Symmetric, Path::new("a.txt"), Path::new("a.txt.gpg"));
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();

        assert!(args.contains(&"--batch".to_string()));
        assert!(args.windows(2).any(|w| w == ["--passphrase-fd", "0"]));
        assert!(args.windows(2).any(|w| w == ["--output", "a.txt.gpg"]));
        assert_eq!(&args[args.len() - 2..], ["--symmetric", "a.txt"]);
        assert!(!args.iter().any(|a| a == "--passphrase"));
    }

    #[test]
    fn extra_args_come_before_the_command() {
        let backend = GpgBackend::new()
            .with_extra_args(vec!["--cipher-algo".into(), "AES256".into()]);
        let args = backend.build_args(Mode::Decrypt, Path::new("a.gpg"), Path::new("a"));
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();

        let algo = args.iter().position(|a| a == "--cipher-algo").unwrap();
        let cmd = args.iter().position(|a| a == "--decrypt").unwrap();
        assert!(algo < cmd);
        assert_eq!(args.last().unwrap(), "a.gpg");
    }

    #[test]
    fn classifies_decryption_failures() {
        assert!(is_decryption_failure("gpg: decryption failed: Bad session key"));
        assert!(is_decryption_failure("gpg: no valid OpenPGP data found."));
        assert!(!is_decryption_failure("gpg: can't open 'x': No such file or directory"));
    }

    #[test]
    fn missing_binary_is_backend_not_found() {
        let backend = GpgBackend::with_path(PathBuf::from("/nonexistent/bin/gpg-missing"));
        let result = backend.ensure_available();
        assert!(matches!(result, Err(GpgBatchError::BackendNotFound { .. })));
        assert!(backend.version().is_none());
    }

    // End-to-end runs against a stub gpg live in tests/.
}
