//! Filesystem access used by the walker, and the host's source tree handle

use crate::error::{ConvertError, IoOperation};
use async_trait::async_trait;
use std::ffi::OsString;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

/// What an entry turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// The I/O capability the walker traverses through
///
/// Every method suspends the calling branch until the underlying I/O completes.
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// List the names of the entries in a directory, exactly as the OS reports them
    async fn list_entries(&self, path: &Path) -> Result<Vec<OsString>, ConvertError>;

    /// Decide whether a path is a directory or a file
    async fn classify(&self, path: &Path) -> Result<EntryKind, ConvertError>;

    /// Read the full contents of a file
    async fn read_content(&self, path: &Path) -> Result<Vec<u8>, ConvertError>;
}

/// Local filesystem access through `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl EntrySource for LocalFs {
    async fn list_entries(&self, path: &Path) -> Result<Vec<OsString>, ConvertError> {
        let list_error = |e| ConvertError::io(IoOperation::List, path, e);
        let mut entries = tokio::fs::read_dir(path).await.map_err(list_error)?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(list_error)? {
            names.push(entry.file_name());
        }
        Ok(names)
    }

    async fn classify(&self, path: &Path) -> Result<EntryKind, ConvertError> {
        // metadata() follows symlinks, so a dangling link fails here
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ConvertError::io(IoOperation::Classify, path, e))?;
        Ok(if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        })
    }

    async fn read_content(&self, path: &Path) -> Result<Vec<u8>, ConvertError> {
        tokio::fs::read(path)
            .await
            .map_err(|e| ConvertError::io(IoOperation::Read, path, e))
    }
}

/// Host-supplied handle to the tree being converted
#[async_trait]
pub trait SourceTree: Send + Sync {
    /// Base name of the handle, used to name the output file
    fn name(&self) -> Option<String>;

    /// Resolve the handle to a concrete root directory; called once per conversion
    async fn resolve(&self) -> Result<PathBuf, ConvertError>;
}

#[async_trait]
impl SourceTree for PathBuf {
    fn name(&self) -> Option<String> {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    async fn resolve(&self) -> Result<PathBuf, ConvertError> {
        let canonical = tokio::fs::canonicalize(self)
            .await
            .map_err(|e| ConvertError::io(IoOperation::List, self, e))?;
        Ok(dunce::simplified(&canonical).to_path_buf())
    }
}

/// A source tree resolved by a host-supplied async function
///
/// Any error the host function returns fails the conversion as
/// [`ConvertError::Resolve`].
pub struct ResolveWith<F> {
    name: String,
    resolver: F,
}

impl<F, Fut, E> ResolveWith<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<PathBuf, E>> + Send,
    E: fmt::Display,
{
    pub fn new(name: impl Into<String>, resolver: F) -> Self {
        Self {
            name: name.into(),
            resolver,
        }
    }
}

#[async_trait]
impl<F, Fut, E> SourceTree for ResolveWith<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<PathBuf, E>> + Send,
    E: fmt::Display,
{
    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    async fn resolve(&self) -> Result<PathBuf, ConvertError> {
        (self.resolver)()
            .await
            .map_err(|e| ConvertError::Resolve(format!("{}: {}", self.name, e)))
    }
}
