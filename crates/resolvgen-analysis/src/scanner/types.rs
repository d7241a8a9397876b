//! Discovery results.

use std::path::PathBuf;

use serde::Serialize;

/// Substring identifying response-definition files.
pub const RESPONSE_FILE_SUFFIX: &str = "response.graphqls";

/// A regular file found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredFile {
    /// Path including the scan root, usable for reading.
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated on every platform.
    pub relative: String,
}

/// All files under a root, in lexical traversal order.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    files: Vec<DiscoveredFile>,
}

impl Discovery {
    pub fn new(files: Vec<DiscoveredFile>) -> Self {
        Self { files }
    }

    /// Files whose relative path contains `suffix`, in traversal order.
    pub fn with_suffix<'a>(&'a self, suffix: &'a str) -> impl Iterator<Item = &'a DiscoveredFile> + 'a {
        self.files.iter().filter(move |f| f.relative.contains(suffix))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
