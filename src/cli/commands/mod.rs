pub mod batch_helpers;
pub mod decrypt;
pub mod decrypt_file;
pub mod encrypt;
pub mod passphrase_helpers;
pub mod report_helpers;
pub mod status;
