use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::core::errors::{GpgBatchError, Result};

/// Which backend operation a target is processed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
        }
    }
}

/// An input file and the path its backend output is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionTarget {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl EncryptionTarget {
    /// Ciphertext goes next to the input, with `suffix` appended to the
    /// full file name (`a.txt` → `a.txt.gpg`).
    pub fn for_encryption(input: &Path, suffix: &str) -> Self {
        let mut name = input.as_os_str().to_os_string();
        name.push(suffix);
        Self {
            input: input.to_path_buf(),
            output: PathBuf::from(name),
        }
    }

    /// Plaintext goes next to the input, with the exact trailing `suffix`
    /// removed from the file name. Names need not be valid UTF-8.
    pub fn for_decryption(input: &Path, suffix: &str) -> Result<Self> {
        let file_name = input.file_name().ok_or_else(|| GpgBatchError::InvalidPath {
            path: input.to_path_buf(),
            reason: "Path has no file name".into(),
        })?;

        let stem = strip_suffix_exact(file_name, suffix).ok_or_else(|| {
            GpgBatchError::InvalidPath {
                path: input.to_path_buf(),
                reason: format!("File name does not end with '{suffix}'"),
            }
        })?;

        if stem.is_empty() {
            return Err(GpgBatchError::InvalidPath {
                path: input.to_path_buf(),
                reason: format!("Removing '{suffix}' leaves an empty file name"),
            });
        }

        Ok(Self {
            input: input.to_path_buf(),
            output: input.with_file_name(stem),
        })
    }
}

/// Whether `name` ends with `suffix`, compared byte for byte.
pub fn has_suffix(name: &OsStr, suffix: &str) -> bool {
    !suffix.is_empty() && name.as_encoded_bytes().ends_with(suffix.as_bytes())
}

/// Remove `suffix` from the end of `name` only when it matches exactly.
#[cfg(unix)]
fn strip_suffix_exact(name: &OsStr, suffix: &str) -> Option<OsString> {
    use std::os::unix::ffi::OsStrExt;

    if suffix.is_empty() {
        return None;
    }
    name.as_bytes()
        .strip_suffix(suffix.as_bytes())
        .map(|stem| OsStr::from_bytes(stem).to_os_string())
}

/// Remove `suffix` from the end of `name` only when it matches exactly.
#[cfg(not(unix))]
fn strip_suffix_exact(name: &OsStr, suffix: &str) -> Option<OsString> {
    if suffix.is_empty() {
        return None;
    }
    name.to_str()?.strip_suffix(suffix).map(OsString::from)
}

/// Check that a suffix can be appended to and stripped from file names.
pub fn validate_suffix(suffix: &str) -> Result<()> {
    if suffix.is_empty() || suffix.contains('/') || suffix.contains('\\') {
        return Err(GpgBatchError::InvalidSuffix {
            suffix: suffix.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encryption_appends_suffix() {
        let t = EncryptionTarget::for_encryption(Path::new("/data/a.txt"), ".gpg");
        assert_eq!(t.output, PathBuf::from("/data/a.txt.gpg"));
        assert_eq!(t.input, PathBuf::from("/data/a.txt"));
    }

    #[test]
    fn decryption_strips_exact_suffix() {
        let t = EncryptionTarget::for_decryption(Path::new("/data/a.txt.gpg"), ".gpg").unwrap();
        assert_eq!(t.output, PathBuf::from("/data/a.txt"));
    }

    #[test]
    fn decryption_keeps_characters_shared_with_suffix() {
        // "pg.gpg" must become "pg", not "" as a character-class trim would give.
        let t = EncryptionTarget::for_decryption(Path::new("/data/pg.gpg"), ".gpg").unwrap();
        assert_eq!(t.output, PathBuf::from("/data/pg"));

        let t = EncryptionTarget::for_decryption(Path::new("/data/log.gpg"), ".gpg").unwrap();
        assert_eq!(t.output, PathBuf::from("/data/log"));
    }

    #[test]
    fn decryption_rejects_non_matching_suffix() {
        let err = EncryptionTarget::for_decryption(Path::new("/data/a.txt"), ".gpg").unwrap_err();
        assert!(matches!(err, GpgBatchError::InvalidPath { .. }));
    }

    #[test]
    fn decryption_rejects_empty_stem() {
        let err = EncryptionTarget::for_decryption(Path::new("/data/.gpg"), ".gpg").unwrap_err();
        assert!(matches!(err, GpgBatchError::InvalidPath { .. }));
    }

    #[test]
    fn multi_part_suffix() {
        let t = EncryptionTarget::for_decryption(Path::new("x/notes.md.enc.gpg"), ".enc.gpg")
            .unwrap();
        assert_eq!(t.output, PathBuf::from("x/notes.md"));
    }

    #[test]
    fn byte_suffix_match() {
        assert!(has_suffix(OsStr::new("a.txt.gpg"), ".gpg"));
        assert!(!has_suffix(OsStr::new("a.gpg.bak"), ".gpg"));
        assert!(!has_suffix(OsStr::new("a.gpg"), ""));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_handled() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"caf\xe9.txt.gpg");
        assert!(has_suffix(name, ".gpg"));

        let input = Path::new("/data").join(name);
        let t = EncryptionTarget::for_decryption(&input, ".gpg").unwrap();
        assert_eq!(
            t.output,
            Path::new("/data").join(OsStr::from_bytes(b"caf\xe9.txt"))
        );

        let plain = Path::new("/data").join(OsStr::from_bytes(b"caf\xe9.txt"));
        let t = EncryptionTarget::for_encryption(&plain, ".gpg");
        assert_eq!(t.output, input);
    }

    #[test]
    fn suffix_validation() {
        assert!(validate_suffix(".gpg").is_ok());
        assert!(validate_suffix("_locked").is_ok());
        assert!(validate_suffix("").is_err());
        assert!(validate_suffix("a/b").is_err());
        assert!(validate_suffix("a\\b").is_err());
    }
}
