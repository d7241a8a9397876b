use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// `[paths]` section: where schemas live and where artifacts go.
/// All paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Top-level directory holding `<project>/<package>` modules.
    pub modules_dir: String,
    /// Directory name holding schema files inside a package; stripped from
    /// import paths.
    pub schemas_dir: String,
    /// Combined schema document.
    pub schema_output: PathBuf,
    /// Resolver artifact.
    pub resolver_output: PathBuf,
}

impl PathsConfig {
    /// Go package directory holding the `model` package, derived from the
    /// resolver output location (`graph/schema.resolvers.go` → `graph`).
    pub fn graph_dir(&self) -> PathBuf {
        self.resolver_output
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            modules_dir: "modules".to_string(),
            schemas_dir: "schemas".to_string(),
            schema_output: PathBuf::from("graph/schema.graphqls"),
            resolver_output: PathBuf::from("graph/schema.resolvers.go"),
        }
    }
}
