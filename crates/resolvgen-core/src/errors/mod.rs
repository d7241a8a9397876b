//! Error taxonomy. Every variant aborts the whole generation run.

mod config_error;
mod emit_error;
mod scan_error;
mod schema_error;

pub use config_error::ConfigError;
pub use emit_error::EmitError;
pub use scan_error::ScanError;
pub use schema_error::SchemaError;

/// Stable, machine-readable code for each error, used as the `[CODE]`
/// prefix of CLI diagnostics.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

/// Top-level error for a generation run.
#[derive(Debug, thiserror::Error)]
pub enum ResolvgenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl ErrorCode for ResolvgenError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Scan(e) => e.error_code(),
            Self::Schema(e) => e.error_code(),
            Self::Emit(e) => e.error_code(),
        }
    }
}

pub type Result<T, E = ResolvgenError> = std::result::Result<T, E>;
