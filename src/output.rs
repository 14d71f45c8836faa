//! Document writer
//!
//! Serializes a finished document and persists it as `<root_name>.json`. The
//! bytes land in a temporary sibling first and are renamed into place, so a
//! failed write never leaves a truncated document behind.

use crate::error::{ConvertError, IoOperation};
use crate::tree::node::Document;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// JSON text layout of the written document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    #[default]
    Compact,
    Pretty,
}

impl JsonFormat {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            JsonFormat::Pretty
        } else {
            JsonFormat::Compact
        }
    }
}

/// Path the document for `root_name` is written to
pub fn output_path(destination_dir: &Path, root_name: &str) -> PathBuf {
    destination_dir.join(format!("{}.json", root_name))
}

/// Serialize `document` to JSON text
pub fn to_json(document: &Document, format: JsonFormat) -> Result<Vec<u8>, ConvertError> {
    let bytes = match format {
        JsonFormat::Compact => serde_json::to_vec(document)?,
        JsonFormat::Pretty => serde_json::to_vec_pretty(document)?,
    };
    Ok(bytes)
}

/// Write `document` to `destination_dir/<root_name>.json`
///
/// The destination directory must already exist.
#[instrument(skip(document), fields(destination = %destination_dir.display()))]
pub async fn write_document(
    document: &Document,
    destination_dir: &Path,
    root_name: &str,
    format: JsonFormat,
) -> Result<PathBuf, ConvertError> {
    let bytes = to_json(document, format)?;
    let target = output_path(destination_dir, root_name);
    let staging = destination_dir.join(format!(".{}.json.{}.tmp", root_name, std::process::id()));

    if let Err(e) = tokio::fs::write(&staging, &bytes).await {
        discard(&staging).await;
        return Err(ConvertError::io(IoOperation::Write, &staging, e));
    }
    if let Err(e) = tokio::fs::rename(&staging, &target).await {
        discard(&staging).await;
        return Err(ConvertError::io(IoOperation::Write, &target, e));
    }

    debug!(path = %target.display(), bytes = bytes.len(), "Wrote document");
    Ok(target)
}

async fn discard(staging: &Path) {
    match tokio::fs::remove_file(staging).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %staging.display(), "Failed to remove staging file: {}", e),
    }
}
