//! Configuration loaded from `resolvgen.toml`.
//!
//! Every section is optional; missing keys fall back to the layout the
//! generated Go project uses by convention (`modules/<project>/<package>`,
//! `graph/` for gqlgen output).

mod generation_config;
mod paths_config;
mod scan_config;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use generation_config::GenerationConfig;
pub use paths_config::PathsConfig;
pub use scan_config::ScanConfig;

/// Default config file name, looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "resolvgen.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolvgenConfig {
    pub project: ProjectConfig,
    pub paths: PathsConfig,
    pub scan: ScanConfig,
    pub generation: GenerationConfig,
}

/// `[project]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Go module path prefixed to every generated import.
    /// When unset, the `module` line of `<root>/go.mod` is used.
    pub go_module: Option<String>,
}

impl ResolvgenConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load the configuration for a project root.
    ///
    /// An explicit path must exist. Without one, `<root>/resolvgen.toml` is
    /// read when present and defaults are used otherwise.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    tracing::debug!(root = %root.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let source = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_toml(&source)
    }

    /// Resolve the Go module path: the configured value, or the `module`
    /// directive of `<root>/go.mod`.
    pub fn go_module_for(&self, root: &Path) -> Result<String, ConfigError> {
        if let Some(module) = self.project.go_module.as_deref() {
            let module = module.trim().trim_end_matches('/');
            if !module.is_empty() {
                return Ok(module.to_string());
            }
        }

        let go_mod = root.join("go.mod");
        if let Ok(content) = std::fs::read_to_string(&go_mod) {
            if let Some(module) = parse_go_mod_module(&content) {
                return Ok(module);
            }
        }

        Err(ConfigError::MissingGoModule {
            root: root.to_path_buf(),
        })
    }
}

/// Extract the module path from the `module` directive of a go.mod file.
fn parse_go_mod_module(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.split("//").next()?.trim().trim_matches('"');
        (!module.is_empty()).then(|| module.to_string())
    })
}
