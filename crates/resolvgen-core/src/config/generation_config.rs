use serde::{Deserialize, Serialize};

/// `[generation]` section: knobs for the emitted Go code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Import path of the package providing the `Upload` scalar.
    pub upload_import: String,
    /// Extra imports added to freshly created service files.
    pub extra_service_imports: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            upload_import: "github.com/99designs/gqlgen/graphql".to_string(),
            extra_service_imports: Vec::new(),
        }
    }
}
