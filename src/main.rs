mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::commands::report_helpers::Completion;
use cli::context::RunContext;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();
    cli::output::init(args.verbose, args.quiet);

    match run(args) {
        Ok(Completion::Clean) => {}
        // Per-file failures were already listed with their causes.
        Ok(Completion::WithFailures) => std::process::exit(2),
        Err(e) => {
            cli::output::error(&format!("Error: {e}"));
            std::process::exit(1);
        }
    }
}

fn run(args: Cli) -> crate::core::errors::Result<Completion> {
    let ctx = RunContext::from_cli(&args)?;
    let explicit_suffix = args.suffix;

    match args.command {
        Commands::Encrypt {
            dir,
            passphrase,
            fail_fast,
        } => cli::commands::encrypt::execute(ctx, &dir, passphrase, fail_fast),
        Commands::Decrypt {
            dir,
            passphrase,
            fail_fast,
        } => cli::commands::decrypt::execute(ctx, &dir, passphrase, fail_fast),
        Commands::DecryptFile { file, passphrase } => cli::commands::decrypt_file::execute(
            ctx,
            &file,
            passphrase,
            explicit_suffix.as_deref(),
        ),
        Commands::Status => cli::commands::status::execute(&ctx),
    }
}
