//! tree-json: Directory Trees as JSON Documents
//!
//! Walks a directory tree concurrently and rolls it up into one nested JSON
//! document: every directory becomes an object, every file a string holding its
//! contents, keyed by the file name up to its first `.`.

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod output;
pub mod tree;

pub use convert::Converter;
pub use error::{ConvertError, IoErrorKind};
pub use tree::node::{Document, TreeNode};
pub use tree::path::PathKey;
pub use tree::source::{EntryKind, EntrySource, LocalFs, ResolveWith, SourceTree};
