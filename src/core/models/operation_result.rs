use crate::core::errors::GpgBatchError;
use crate::core::models::target::EncryptionTarget;

/// What happened to one file of a batch.
#[derive(Debug)]
pub enum Outcome {
    Succeeded,
    Failed(GpgBatchError),
    /// The batch was cancelled before this file was started.
    Cancelled,
}

/// The result of processing one target. Created once the backend call
/// returns and never modified afterwards.
#[derive(Debug)]
pub struct OperationResult {
    pub target: EncryptionTarget,
    pub outcome: Outcome,
}

impl OperationResult {
    pub fn succeeded(target: EncryptionTarget) -> Self {
        Self {
            target,
            outcome: Outcome::Succeeded,
        }
    }

    pub fn failed(target: EncryptionTarget, error: GpgBatchError) -> Self {
        Self {
            target,
            outcome: Outcome::Failed(error),
        }
    }

    pub fn cancelled(target: EncryptionTarget) -> Self {
        Self {
            target,
            outcome: Outcome::Cancelled,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.outcome, Outcome::Cancelled)
    }

    pub fn error(&self) -> Option<&GpgBatchError> {
        match &self.outcome {
            Outcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Stable lowercase label for listings and JSON.
    pub fn status_label(&self) -> &'static str {
        match self.outcome {
            Outcome::Succeeded => "succeeded",
            Outcome::Failed(_) => "failed",
            Outcome::Cancelled => "cancelled",
        }
    }
}
