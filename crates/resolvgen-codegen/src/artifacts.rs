//! Staged artifacts and their atomic commit.
//!
//! Emitters never touch the disk for writing. They push rendered content
//! into an [`ArtifactSet`]; only after every emitter succeeded is the set
//! committed, each file through a sibling temp file and a rename. Files
//! whose content hash already matches are left alone so their mtime stays.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use resolvgen_core::errors::EmitError;
use xxhash_rust::xxh3::{xxh3_64, Xxh3};

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

/// Statistics from a commit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommitStats {
    pub written: usize,
    pub unchanged: usize,
}

/// Artifacts of one generation run, in staging order.
#[derive(Debug, Default, Clone)]
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an artifact. Staging the same path twice keeps the later content.
    pub fn push(&mut self, path: PathBuf, content: String) {
        if let Some(existing) = self.artifacts.iter_mut().find(|a| a.path == path) {
            tracing::debug!(path = %path.display(), "artifact restaged");
            existing.content = content;
            return;
        }
        self.artifacts.push(Artifact { path, content });
    }

    pub fn get(&self, path: &Path) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Artifacts whose content differs from what is on disk.
    pub fn pending(&self) -> Result<Vec<&Artifact>, EmitError> {
        let mut pending = Vec::new();
        for artifact in &self.artifacts {
            if !is_unchanged(artifact)? {
                pending.push(artifact);
            }
        }
        Ok(pending)
    }

    /// Write every changed artifact to disk.
    pub fn commit(&self) -> Result<CommitStats, EmitError> {
        let mut stats = CommitStats::default();

        for artifact in &self.artifacts {
            if is_unchanged(artifact)? {
                tracing::debug!(path = %artifact.path.display(), "artifact unchanged");
                stats.unchanged += 1;
                continue;
            }
            write_atomic(&artifact.path, &artifact.content)?;
            tracing::debug!(path = %artifact.path.display(), bytes = artifact.content.len(), "artifact written");
            stats.written += 1;
        }

        tracing::info!(written = stats.written, unchanged = stats.unchanged, "artifacts committed");
        Ok(stats)
    }
}

/// Read a previously generated file. A missing file is `None`.
pub fn read_existing(path: &Path) -> Result<Option<String>, EmitError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(EmitError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Compare the file on disk with the staged content: sizes first, then an
/// xxh3 digest streamed over the file.
fn is_unchanged(artifact: &Artifact) -> Result<bool, EmitError> {
    let read_error = |source| EmitError::Read {
        path: artifact.path.clone(),
        source,
    };

    let mut file = match File::open(&artifact.path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(read_error(e)),
    };
    if file.metadata().map_err(read_error)?.len() != artifact.content.len() as u64 {
        return Ok(false);
    }

    let mut hasher = Xxh3::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(read_error)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.digest() == xxh3_64(artifact.content.as_bytes()))
}

/// Sibling temp path: `dir/.name.resolvgen.tmp`.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.resolvgen.tmp"))
}

fn write_atomic(path: &Path, content: &str) -> Result<(), EmitError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| EmitError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let staged = staging_path(path);
    std::fs::write(&staged, content).map_err(|source| EmitError::Write {
        path: staged.clone(),
        source,
    })?;

    std::fs::rename(&staged, path).map_err(|source| {
        let _ = std::fs::remove_file(&staged);
        EmitError::Commit {
            staged: staged.clone(),
            path: path.to_path_buf(),
            source,
        }
    })
}
