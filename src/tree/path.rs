//! Path keys and leaf key derivation

use std::fmt;

/// Derive the document key for a file name
///
/// The name is truncated at its first `.`, so `notes.txt` becomes `notes`,
/// `archive.tar.gz` becomes `archive` and a dotfile such as `.env` becomes the
/// empty string. Names without a `.` are used verbatim.
pub fn leaf_key(file_name: &str) -> &str {
    match file_name.split_once('.') {
        Some((stem, _)) => stem,
        None => file_name,
    }
}

/// Sequence of name segments locating an entry relative to the traversal root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathKey {
    segments: Vec<String>,
}

impl PathKey {
    /// The key of the traversal root itself (no segments)
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend this key by one segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The entry's own name (last segment)
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl<S: Into<String>> FromIterator<S> for PathKey {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
