pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Encrypt and decrypt whole folders with a passphrase, using gpg.
#[derive(Parser, Debug)]
#[command(name = "gpgbatch", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the gpg binary
    #[arg(long, global = true, env = "GPGBATCH_GPG")]
    pub gpg: Option<PathBuf>,

    /// Ciphertext suffix (default: .gpg)
    #[arg(long, global = true, env = "GPGBATCH_SUFFIX")]
    pub suffix: Option<String>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode: only show errors and resulting files
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to alternative config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt every file in a directory
    Encrypt {
        /// Directory to encrypt
        dir: PathBuf,
        /// Passphrase (prompted when omitted)
        #[arg(env = "GPGBATCH_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,
        /// Stop starting new files after the first failure
        #[arg(long)]
        fail_fast: bool,
    },

    /// Decrypt every suffixed file in a directory
    Decrypt {
        /// Directory to decrypt
        dir: PathBuf,
        /// Passphrase (prompted when omitted)
        #[arg(env = "GPGBATCH_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,
        /// Stop starting new files after the first failure
        #[arg(long)]
        fail_fast: bool,
    },

    /// Decrypt a single file (suffix defaults to its extension)
    DecryptFile {
        /// File to decrypt
        file: PathBuf,
        /// Passphrase (prompted when omitted)
        #[arg(env = "GPGBATCH_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,
    },

    /// Show backend and configuration status
    Status,
}
