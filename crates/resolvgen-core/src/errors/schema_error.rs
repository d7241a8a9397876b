use std::path::PathBuf;

use super::ErrorCode;

/// Textual-contract violations detected while reading schema files.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no top-level `type <Name> {{` block found in {}", path.display())]
    MissingTypeBlock { path: PathBuf },

    #[error(
        "argument `input` of action '{action}' in {} has type '{type_name}'; \
         the type name must contain 'Input' (e.g. 'ActionInput')",
        path.display()
    )]
    InvalidInputArgument {
        action: String,
        type_name: String,
        path: PathBuf,
    },

    #[error(
        "response '{token}' of action '{action}' in {} must be declared non-null \
         (e.g. 'ActionResponse!')",
        path.display()
    )]
    InvalidResponseName {
        action: String,
        token: String,
        path: PathBuf,
    },

    #[error(
        "result '{result}' of response '{response}' in {} must contain 'Result' \
         (e.g. 'ActionResult') or be one of Int, Boolean, String",
        path.display()
    )]
    InvalidResultName {
        response: String,
        result: String,
        path: PathBuf,
    },

    #[error("response '{response}' in {} is missing the '{field}' field", path.display())]
    MissingEnvelopeField {
        response: String,
        field: &'static str,
        path: PathBuf,
    },

    #[error(
        "schema file {} is not laid out as <modules>/<project>/<package>/...",
        path.display()
    )]
    UnexpectedLayout { path: PathBuf },
}

impl ErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "SCHEMA_READ",
            Self::MissingTypeBlock { .. } => "SCHEMA_MISSING_TYPE_BLOCK",
            Self::InvalidInputArgument { .. } => "SCHEMA_INVALID_INPUT_ARGUMENT",
            Self::InvalidResponseName { .. } => "SCHEMA_INVALID_RESPONSE",
            Self::InvalidResultName { .. } => "SCHEMA_INVALID_RESULT",
            Self::MissingEnvelopeField { .. } => "SCHEMA_MISSING_ENVELOPE_FIELD",
            Self::UnexpectedLayout { .. } => "SCHEMA_UNEXPECTED_LAYOUT",
        }
    }
}
