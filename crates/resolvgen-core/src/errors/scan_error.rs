use std::path::PathBuf;

use super::ErrorCode;

/// Errors raised while walking the project tree.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scan root {} does not exist or is not a directory", root.display())]
    InvalidRoot { root: PathBuf },

    #[error("invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("walk failed under {}: {message}", root.display())]
    Walk { root: PathBuf, message: String },
}

impl ErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRoot { .. } => "SCAN_INVALID_ROOT",
            Self::InvalidPattern { .. } => "SCAN_INVALID_PATTERN",
            Self::Walk { .. } => "SCAN_WALK",
        }
    }
}
