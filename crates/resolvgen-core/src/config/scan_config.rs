use serde::{Deserialize, Serialize};

/// `[scan]` section: schema discovery settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Additional gitignore-style patterns excluded from discovery.
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links while walking. Defaults to false.
    pub follow_symlinks: Option<bool>,
    /// Honour `.gitignore` files. Defaults to true.
    pub respect_gitignore: Option<bool>,
}

impl ScanConfig {
    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    pub fn effective_respect_gitignore(&self) -> bool {
        self.respect_gitignore.unwrap_or(true)
    }
}
