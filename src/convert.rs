//! Conversion entry point for host pipelines
//!
//! Resolves the source tree, walks it into a fresh document and writes the
//! document only when the whole walk succeeded.

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::output::{self, JsonFormat};
use crate::tree::source::{EntrySource, LocalFs, SourceTree};
use crate::tree::walker::Walker;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

/// Converts source trees into JSON documents
///
/// Holds no per-conversion state, so one converter may run any number of
/// conversions, concurrently or in sequence.
pub struct Converter<S = LocalFs> {
    walker: Walker<S>,
    format: JsonFormat,
}

impl Converter<LocalFs> {
    /// Create a converter reading the local filesystem
    pub fn new(config: &ConvertConfig) -> Self {
        Self::with_source(LocalFs, config)
    }
}

impl<S: EntrySource> Converter<S> {
    /// Create a converter traversing through a custom entry source
    pub fn with_source(source: S, config: &ConvertConfig) -> Self {
        Self {
            walker: Walker::with_config(source, &config.walk),
            format: JsonFormat::from_pretty(config.output.pretty),
        }
    }

    /// Convert `tree` into `destination_dir/<name>.json`
    ///
    /// Returns the path of the written file.
    pub async fn convert<T>(&self, tree: &T, destination_dir: &Path) -> Result<PathBuf, ConvertError>
    where
        T: SourceTree + ?Sized,
    {
        self.convert_with_cancel(tree, destination_dir, &CancellationToken::new())
            .await
    }

    /// Like [`Converter::convert`], failing with [`ConvertError::Cancelled`] once
    /// `cancel` is cancelled
    #[instrument(skip_all, fields(destination = %destination_dir.display()))]
    pub async fn convert_with_cancel<T>(
        &self,
        tree: &T,
        destination_dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, ConvertError>
    where
        T: SourceTree + ?Sized,
    {
        let start = Instant::now();

        let root = tree.resolve().await?;
        let root_name = root_name(tree.name(), &root)?;
        info!(root = %root.display(), name = %root_name, "Starting conversion");

        let document = match self.walker.walk(&root, cancel).await {
            Ok(document) => document,
            Err(e) => {
                error!(root = %root.display(), "Conversion failed, nothing written: {}", e);
                return Err(e);
            }
        };

        let written = output::write_document(&document, destination_dir, &root_name, self.format).await?;
        info!(
            output = %written.display(),
            duration_ms = start.elapsed().as_millis(),
            "Conversion completed"
        );
        Ok(written)
    }
}

/// Base name for the output file: the handle's own name, else the resolved root's
fn root_name(handle_name: Option<String>, resolved: &Path) -> Result<String, ConvertError> {
    handle_name
        .filter(|name| !name.is_empty() && name != "." && name != "..")
        .or_else(|| {
            resolved
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .ok_or_else(|| {
            ConvertError::Config(format!(
                "Cannot derive an output name for source tree {:?}",
                resolved
            ))
        })
}
