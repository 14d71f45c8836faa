//! CLI route: merge flags over loaded configuration and run the conversion.

use crate::cli::parse::Cli;
use crate::config::{ConfigLoader, ConvertConfig};
use crate::convert::Converter;
use crate::error::ConvertError;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Resolved settings for one CLI invocation
pub struct RunContext {
    source: PathBuf,
    dest: PathBuf,
    config: ConvertConfig,
}

impl RunContext {
    /// Load configuration from files and environment, then apply CLI flags
    pub fn new(cli: &Cli) -> Result<Self, ConvertError> {
        let loaded = ConfigLoader::load(cli.config.as_deref())?;
        Self::with_config(cli, loaded)
    }

    /// Apply CLI flags on top of an already loaded configuration
    pub fn with_config(cli: &Cli, mut config: ConvertConfig) -> Result<Self, ConvertError> {
        if cli.pretty {
            config.output.pretty = true;
        }
        if let Some(limit) = cli.max_in_flight {
            config.walk.max_in_flight = Some(limit);
        }
        if let Some(policy) = cli.on_collision {
            config.walk.collisions = policy;
        }

        let logging = &mut config.logging;
        if cli.quiet {
            logging.enabled = false;
        }
        if cli.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(ref level) = cli.log_level {
            logging.level = level.clone();
        }
        if let Some(ref format) = cli.log_format {
            logging.format = format.clone();
        }
        if let Some(ref output) = cli.log_output {
            logging.output = output.clone();
        }
        if let Some(ref file) = cli.log_file {
            logging.file = Some(file.clone());
        }

        config.validate()?;
        Ok(Self {
            source: cli.source.clone(),
            dest: cli.dest.clone(),
            config,
        })
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Run the conversion; Ctrl-C cancels it
    pub async fn execute(&self) -> Result<PathBuf, ConvertError> {
        let converter = Converter::new(&self.config);
        let cancel = CancellationToken::new();

        let interrupt = cancel.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling conversion");
                interrupt.cancel();
            }
        });

        info!(source = %self.source.display(), dest = %self.dest.display(), "Running conversion");
        let result = converter
            .convert_with_cancel(&self.source, &self.dest, &cancel)
            .await;
        watcher.abort();
        result
    }
}
