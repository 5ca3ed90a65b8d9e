use crate::core::models::batch_report::BatchReport;
use crate::core::models::operation_result::OperationResult;
use crate::core::models::target::Operation;

/// Fold per-file results into a report. Performs no I/O.
///
/// Every result is kept, so `report.total()` always equals the number of
/// files offered to the workflow.
pub fn aggregate(operation: Operation, results: Vec<OperationResult>) -> BatchReport {
    let succeeded = results.iter().filter(|r| r.is_success()).count();
    let failed = results.iter().filter(|r| r.is_failure()).count();
    let cancelled = results.iter().filter(|r| r.is_cancelled()).count();

    BatchReport {
        operation,
        results,
        resulting_files: Vec::new(),
        succeeded,
        failed,
        cancelled,
    }
}
