use crate::adapters::cipher::gpg_backend::GpgBackend;
use crate::cli::Cli;
use crate::config::app_config::{AppConfig, ConfigSource};
use crate::core::errors::Result;
use crate::core::models::target::validate_suffix;

/// Settings for one command run, merged from flags, environment and the
/// config file (in that order of precedence).
pub struct RunContext {
    pub gpg: GpgBackend,
    pub suffix: String,
    pub fail_fast: bool,
    pub json: bool,
    pub config_source: ConfigSource,
}

impl RunContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (config, config_source) = AppConfig::load(cli.config.as_deref())?;

        let gpg_path = cli.gpg.clone().unwrap_or(config.backend.path);
        let gpg = GpgBackend::with_path(gpg_path).with_extra_args(config.backend.extra_args);

        let suffix = cli.suffix.clone().unwrap_or(config.workflow.suffix);
        validate_suffix(&suffix)?;

        Ok(Self {
            gpg,
            suffix,
            fail_fast: config.workflow.fail_fast,
            json: cli.json,
            config_source,
        })
    }
}
