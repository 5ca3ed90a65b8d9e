use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{GpgBatchError, Result};
use crate::core::models::batch_report::BatchReport;
use crate::core::models::cancel::CancelToken;
use crate::core::models::operation_result::OperationResult;
use crate::core::models::target::{EncryptionTarget, Operation};
use crate::core::services::result_aggregator;

/// Name prefix of in-flight backend outputs. Files whose names start with
/// it are never treated as candidates.
pub const TEMP_PREFIX: &str = ".~gpgbatch-partial-";

/// Caller-side controls for a running batch.
pub struct BatchHooks<'a> {
    cancel: CancelToken,
    observer: Box<dyn FnMut(&OperationResult) + 'a>,
}

impl<'a> BatchHooks<'a> {
    pub fn new() -> Self {
        Self {
            cancel: CancelToken::new(),
            observer: Box::new(|_: &OperationResult| {}),
        }
    }

    /// Stop starting new files once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Called after every file with its result.
    pub fn on_result(mut self, observer: impl FnMut(&OperationResult) + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }
}

impl Default for BatchHooks<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Process `inputs` one after another.
///
/// `plan` derives each target; `invoke` runs the backend for a target,
/// writing to the temporary path it is given. A failure is recorded
/// against its file and the loop moves on.
pub(crate) fn run_batch<P, I>(
    operation: Operation,
    inputs: Vec<PathBuf>,
    plan: P,
    invoke: I,
    hooks: BatchHooks<'_>,
) -> BatchReport
where
    P: Fn(&Path) -> Result<EncryptionTarget>,
    I: Fn(&EncryptionTarget, &Path) -> Result<()>,
{
    let BatchHooks {
        cancel,
        mut observer,
    } = hooks;
    let mut results = Vec::with_capacity(inputs.len());

    for input in inputs {
        let result = if cancel.is_cancelled() {
            OperationResult::cancelled(plan(&input).unwrap_or_else(|_| unplanned(input)))
        } else {
            match plan(&input) {
                Err(e) => OperationResult::failed(unplanned(input), e),
                Ok(target) => {
                    let written =
                        write_atomically(&target.input, &target.output, |tmp| invoke(&target, tmp));
                    match written {
                        Ok(()) => OperationResult::succeeded(target),
                        Err(e) => OperationResult::failed(target, e),
                    }
                }
            }
        };

        observer(&result);
        results.push(result);
    }

    result_aggregator::aggregate(operation, results)
}

/// Target for an input whose output could not be derived; the input
/// stands in for it.
fn unplanned(input: PathBuf) -> EncryptionTarget {
    EncryptionTarget {
        output: input.clone(),
        input,
    }
}

/// Let `write` produce a hidden temp file next to `output`, then move it
/// into place with the permissions of `source`. Nothing is left behind when
/// `write` fails.
pub(crate) fn write_atomically<W>(source: &Path, output: &Path, write: W) -> Result<()>
where
    W: FnOnce(&Path) -> Result<()>,
{
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(dir)?
        .into_temp_path();

    write(&temp)?;
    // Temp files are created owner-only.
    fs::set_permissions(&temp, fs::metadata(source)?.permissions())?;

    temp.persist(output)
        .map_err(|e| GpgBatchError::InvalidPath {
            path: output.to_path_buf(),
            reason: format!("Cannot move output into place: {}", e.error),
        })?;
    Ok(())
}
