//! Directory tree to document
//!
//! Walks a directory hierarchy and assembles it into a nested document where
//! directories are mappings and files are string leaves.

pub mod assembler;
pub mod node;
pub mod path;
pub mod source;
pub mod walker;
