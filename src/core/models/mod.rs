pub mod batch_report;
pub mod cancel;
pub mod operation_result;
pub mod passphrase;
pub mod target;
