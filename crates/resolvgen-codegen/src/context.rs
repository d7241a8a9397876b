//! Project-wide settings every emitter needs.

use std::path::{Path, PathBuf};

use resolvgen_analysis::naming::MODEL_PACKAGE;
use resolvgen_core::ResolvgenConfig;

/// Resolved Go module path, project root and configuration.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub root: &'a Path,
    pub go_module: &'a str,
    pub config: &'a ResolvgenConfig,
}

impl<'a> EmitContext<'a> {
    pub fn new(root: &'a Path, go_module: &'a str, config: &'a ResolvgenConfig) -> Self {
        Self {
            root,
            go_module,
            config,
        }
    }

    /// Import path of the gqlgen model package: `<module>/graph/model`.
    pub fn model_import(&self) -> String {
        let graph_dir = slash_path(&self.config.paths.graph_dir());
        if graph_dir.is_empty() {
            format!("{}/{MODEL_PACKAGE}", self.go_module)
        } else {
            format!("{}/{graph_dir}/{MODEL_PACKAGE}", self.go_module)
        }
    }

    /// Import path of a module directory: `<module>/modules/shop/user`.
    pub fn module_import(&self, module_dir: &str) -> String {
        format!("{}/{module_dir}", self.go_module)
    }

    pub fn upload_import(&self) -> &str {
        &self.config.generation.upload_import
    }

    /// Resolve a root-relative output path.
    pub fn output_path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

/// `/`-joined components of a relative path.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
