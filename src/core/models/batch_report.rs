use std::path::PathBuf;

use crate::core::models::operation_result::OperationResult;
use crate::core::models::target::Operation;

/// Everything a batch workflow hands back to its caller.
///
/// `results` holds exactly one entry per file offered to the workflow, in
/// processing order. `resulting_files` is the directory listing taken after
/// the batch finished: ciphertext files for encryption, non-suffixed files
/// for decryption.
#[derive(Debug)]
pub struct BatchReport {
    pub operation: Operation,
    pub results: Vec<OperationResult>,
    pub resulting_files: Vec<PathBuf>,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// True when every offered file was processed successfully.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.cancelled == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &OperationResult> {
        self.results.iter().filter(|r| r.is_failure())
    }

    pub fn with_resulting_files(mut self, files: Vec<PathBuf>) -> Self {
        self.resulting_files = files;
        self
    }
}
