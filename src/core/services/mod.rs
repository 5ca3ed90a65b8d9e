pub mod batch_runner;
pub mod decryption_workflow;
pub mod encryption_workflow;
pub mod file_set_resolver;
pub mod result_aggregator;

#[cfg(test)]
pub(crate) mod test_support;
