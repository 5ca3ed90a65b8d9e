use std::path::Path;

use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::batch_report::BatchReport;
use crate::core::models::cancel::CancelToken;
use crate::core::services::batch_runner::BatchHooks;
use crate::core::services::file_set_resolver;

/// Run a batch workflow behind a progress bar.
///
/// `filter` must match the workflow's own candidate filter so the bar
/// length is right. With `fail_fast`, the first failed file cancels the
/// files not yet started.
pub fn with_progress<F>(
    dir: &Path,
    filter: Option<&str>,
    verb: &str,
    fail_fast: bool,
    json: bool,
    run: F,
) -> Result<BatchReport>
where
    F: FnOnce(BatchHooks<'_>) -> Result<BatchReport>,
{
    let len = file_set_resolver::resolve(dir, filter)
        .map(|files| files.len())
        .unwrap_or(0);
    let bar = if json {
        indicatif::ProgressBar::hidden()
    } else {
        output::progress(len, verb)
    };

    let cancel = CancelToken::new();
    let stopper = cancel.clone();
    let hooks = BatchHooks::new().with_cancel(cancel).on_result(|result| {
        bar.inc(1);
        if let Some(name) = result.target.input.file_name() {
            bar.set_message(name.to_string_lossy().into_owned());
        }
        if fail_fast && result.is_failure() {
            stopper.cancel();
        }
    });

    let report = run(hooks);
    bar.finish_and_clear();
    report
}
