//! Concurrent tree walker
//!
//! Lists a directory, classifies every entry concurrently, recurses into
//! subdirectories and loads files. Each directory level owns the node it builds
//! and hands it to its parent only once its own walk has resolved. The first
//! failing branch fails the whole walk and cancels everything still in flight.

use crate::config::{CollisionPolicy, WalkConfig};
use crate::error::ConvertError;
use crate::tree::assembler;
use crate::tree::node::{Directory, Document, TreeNode};
use crate::tree::path::{leaf_key, PathKey};
use crate::tree::source::{EntryKind, EntrySource};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::{Semaphore, SemaphorePermit};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, trace, warn};

/// Tree walker over an [`EntrySource`]
pub struct Walker<S> {
    source: S,
    collisions: CollisionPolicy,
    /// Bounds simultaneous I/O operations; a permit never outlives one operation
    limiter: Option<Semaphore>,
}

impl<S: EntrySource> Walker<S> {
    /// Create a walker with the default configuration (unbounded, overwrite on collision)
    pub fn new(source: S) -> Self {
        Self::with_config(source, &WalkConfig::default())
    }

    pub fn with_config(source: S, config: &WalkConfig) -> Self {
        Self {
            source,
            collisions: config.collisions,
            limiter: config.max_in_flight.map(Semaphore::new),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Walk the directory at `root` and build its document
    ///
    /// Cancelling `cancel` fails the walk with [`ConvertError::Cancelled`].
    #[instrument(skip_all, fields(root = %root.display()))]
    pub async fn walk(
        &self,
        root: &Path,
        cancel: &CancellationToken,
    ) -> Result<Document, ConvertError> {
        let start = Instant::now();
        debug!("Starting tree walk");

        let children = match self
            .walk_directory(root.to_path_buf(), PathKey::root(), cancel.child_token())
            .await
        {
            Ok(children) => children,
            Err(e) => {
                error!("Tree walk failed: {}", e);
                return Err(e);
            }
        };

        let document = Document::from(children);

        info!(
            top_level_entries = document.len(),
            duration_ms = start.elapsed().as_millis(),
            "Tree walk completed"
        );
        Ok(document)
    }

    fn walk_directory<'a>(
        &'a self,
        dir: PathBuf,
        key: PathKey,
        cancel: CancellationToken,
    ) -> BoxFuture<'a, Result<Directory, ConvertError>> {
        Box::pin(async move {
            let names = self
                .guarded(&cancel, self.source.list_entries(&dir))
                .await?;
            debug!(
                path = %key,
                depth = key.depth(),
                entry_count = names.len(),
                "Listed directory"
            );

            let mut directory = Directory::new();
            if names.is_empty() {
                return Ok(directory);
            }

            let branch_cancel = cancel.child_token();
            let mut branches: FuturesUnordered<_> = names
                .into_iter()
                .map(|name| {
                    let path = dir.join(&name);
                    // Keys are text; the path keeps the name's raw bytes
                    let child_key = key.child(name.to_string_lossy());
                    self.walk_entry(path, child_key, branch_cancel.clone())
                })
                .collect();

            while let Some(outcome) = branches.next().await {
                let placed = outcome
                    .and_then(|(entry_key, node)| self.place(&mut directory, &dir, entry_key, node));
                if let Err(e) = placed {
                    branch_cancel.cancel();
                    debug!(
                        path = %key,
                        pending = branches.len(),
                        "Branch failed, cancelling siblings: {}",
                        e
                    );
                    return Err(e);
                }
            }

            Ok(directory)
        })
    }

    /// Classify one entry, then recurse into it or load it
    ///
    /// Resolves to the entry's key within its parent and its finished node.
    async fn walk_entry(
        &self,
        path: PathBuf,
        key: PathKey,
        cancel: CancellationToken,
    ) -> Result<(String, TreeNode), ConvertError> {
        let name = key.name().unwrap_or_default().to_string();
        match self.guarded(&cancel, self.source.classify(&path)).await? {
            EntryKind::Directory => {
                let children = self.walk_directory(path, key, cancel).await?;
                Ok((name, TreeNode::Directory(children)))
            }
            EntryKind::File => {
                let bytes = self
                    .guarded(&cancel, self.source.read_content(&path))
                    .await?;
                trace!(path = %key, bytes = bytes.len(), "Loaded file");
                Ok((leaf_key(&name).to_string(), TreeNode::leaf_from_bytes(bytes)))
            }
        }
    }

    fn place(
        &self,
        directory: &mut Directory,
        dir: &Path,
        entry_key: String,
        node: TreeNode,
    ) -> Result<(), ConvertError> {
        let key = PathKey::root().child(entry_key.as_str());
        let Some(displaced) = assembler::insert(directory, &key, node) else {
            return Ok(());
        };
        match self.collisions {
            CollisionPolicy::Overwrite => {
                warn!(
                    directory = %dir.display(),
                    key = %entry_key,
                    displaced_directory = displaced.is_directory(),
                    "Key collision, later entry overwrote earlier one"
                );
                Ok(())
            }
            CollisionPolicy::Reject => Err(ConvertError::DuplicateKey {
                key: entry_key,
                path: dir.to_path_buf(),
            }),
        }
    }

    /// Run one I/O operation under the in-flight limit, racing cancellation
    async fn guarded<T, F>(
        &self,
        cancel: &CancellationToken,
        operation: F,
    ) -> Result<T, ConvertError>
    where
        F: Future<Output = Result<T, ConvertError>>,
    {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ConvertError::Cancelled),
            result = async {
                match self.acquire().await {
                    Ok(_permit) => operation.await,
                    Err(e) => Err(e),
                }
            } => result,
        }
    }

    async fn acquire(&self) -> Result<Option<SemaphorePermit<'_>>, ConvertError> {
        match &self.limiter {
            Some(limiter) => limiter
                .acquire()
                .await
                .map(Some)
                .map_err(|_| ConvertError::Cancelled),
            None => Ok(None),
        }
    }
}
