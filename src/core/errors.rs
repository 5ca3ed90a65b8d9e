use std::path::PathBuf;

/// All domain errors for gpgbatch.
///
/// Setup errors (`InvalidPath`, `BackendNotFound`, `InvalidSuffix`,
/// `InvalidConfig`, `PassphraseUnavailable`) abort an operation before any
/// file is touched. `BackendInvocation` and `DecryptionFailed` describe a
/// single file and are recorded in the batch report instead of aborting it.
#[derive(Debug, thiserror::Error)]
pub enum GpgBatchError {
    #[error(
        "Invalid path: {path}\n\n  \
         {reason}\n  \
         Check that the path is correct and accessible."
    )]
    InvalidPath { path: PathBuf, reason: String },

    #[error(
        "Encryption backend not found: {path}\n\n  \
         {detail}\n\n  \
         Solutions:\n    \
         → Install GnuPG and make sure 'gpg' is in PATH\n    \
         → Point to the binary: --gpg /path/to/gpg (or GPGBATCH_GPG)\n    \
         → Set [backend] path in config.toml"
    )]
    BackendNotFound { path: PathBuf, detail: String },

    #[error("Backend failed on {path}: {detail}")]
    BackendInvocation { path: PathBuf, detail: String },

    #[error(
        "Decryption failed for {path}: {detail}\n\n  \
         The passphrase is wrong or the file is not valid ciphertext."
    )]
    DecryptionFailed { path: PathBuf, detail: String },

    #[error(
        "Invalid suffix '{suffix}'\n\n  \
         The suffix must be non-empty and must not contain a path separator.\n  \
         Example: --suffix .gpg"
    )]
    InvalidSuffix { suffix: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "No passphrase available: {detail}\n\n  \
         Solutions:\n    \
         → Pass it as an argument: gpgbatch encrypt <dir> <passphrase>\n    \
         → Export GPGBATCH_PASSPHRASE\n    \
         → Run from a terminal to be prompted"
    )]
    PassphraseUnavailable { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GpgBatchError {
    /// True for errors that belong to one file of a batch and must not
    /// stop the remaining files.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::BackendInvocation { .. } | Self::DecryptionFailed { .. }
        )
    }

    /// Short single-line description used in per-file listings.
    pub fn summary(&self) -> String {
        match self {
            Self::InvalidPath { reason, .. } => reason.clone(),
            Self::BackendNotFound { detail, .. } => format!("backend not found: {detail}"),
            Self::BackendInvocation { detail, .. } => detail.clone(),
            Self::DecryptionFailed { detail, .. } => format!("decryption failed: {detail}"),
            Self::InvalidSuffix { suffix } => format!("invalid suffix '{suffix}'"),
            Self::InvalidConfig { detail } => detail.clone(),
            Self::PassphraseUnavailable { detail } => detail.clone(),
            Self::Io(e) => e.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GpgBatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_errors_are_per_file() {
        let err = GpgBatchError::BackendInvocation {
            path: "a.txt".into(),
            detail: "exit status 2".into(),
        };
        assert!(err.is_per_file());

        let err = GpgBatchError::DecryptionFailed {
            path: "a.txt.gpg".into(),
            detail: "Bad session key".into(),
        };
        assert!(err.is_per_file());
    }

    #[test]
    fn setup_errors_are_not_per_file() {
        let err = GpgBatchError::InvalidPath {
            path: "/nope".into(),
            reason: "does not exist".into(),
        };
        assert!(!err.is_per_file());
        assert!(
            !GpgBatchError::BackendNotFound {
                path: "gpg".into(),
                detail: "missing".into()
            }
            .is_per_file()
        );
    }

    #[test]
    fn per_file_message_names_file_and_detail() {
        let err = GpgBatchError::BackendInvocation {
            path: "docs/report.pdf".into(),
            detail: "gpg: can't open".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("docs/report.pdf"));
        assert!(msg.contains("gpg: can't open"));
    }
}
