use std::path::PathBuf;

use super::ErrorCode;

/// Errors raised while loading `resolvgen.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(
        "no Go module path configured: set [project] go_module in resolvgen.toml \
         or add a go.mod under {}",
        root.display()
    )]
    MissingGoModule { root: PathBuf },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CONFIG_IO",
            Self::Parse(_) => "CONFIG_PARSE",
            Self::MissingGoModule { .. } => "CONFIG_MISSING_GO_MODULE",
        }
    }
}
