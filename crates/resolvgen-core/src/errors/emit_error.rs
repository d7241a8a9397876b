use std::path::PathBuf;

use super::ErrorCode;

/// Errors raised while rendering or committing generated artifacts.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to read existing artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write artifact {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move {} into place at {}: {source}", staged.display(), path.display())]
    Commit {
        staged: PathBuf,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ErrorCode for EmitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "EMIT_READ",
            Self::Write { .. } => "EMIT_WRITE",
            Self::Commit { .. } => "EMIT_COMMIT",
        }
    }
}
