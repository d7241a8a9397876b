//! Module layout: `<modules>/<project>/<package>/[schemas/]<file>`.

use resolvgen_core::config::PathsConfig;
use resolvgen_core::types::ModuleRef;

/// Derive the module a schema file belongs to and its import directory.
///
/// Returns `None` when the relative path is not at least
/// `<modules_dir>/<project>/<package>/<file>`. The import directory is the
/// file's parent with every `schemas_dir` component removed.
pub fn module_layout(relative: &str, paths: &PathsConfig) -> Option<(ModuleRef, String)> {
    let parts: Vec<&str> = relative.split('/').filter(|p| !p.is_empty()).collect();
    if parts.len() < 4 || parts[0] != paths.modules_dir {
        return None;
    }

    let module = ModuleRef {
        project: parts[1].to_string(),
        package: parts[2].to_string(),
    };
    let module_dir = parts[..parts.len() - 1]
        .iter()
        .filter(|p| **p != paths.schemas_dir)
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    Some((module, module_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_strips_schemas_dir() {
        let (module, dir) =
            module_layout("modules/shop/cart/schemas/cart_query.graphqls", &PathsConfig::default())
                .unwrap();
        assert_eq!(module.project, "shop");
        assert_eq!(module.package, "cart");
        assert_eq!(dir, "modules/shop/cart");
    }

    #[test]
    fn test_layout_without_schemas_dir() {
        let (_, dir) =
            module_layout("modules/shop/cart/query.graphqls", &PathsConfig::default()).unwrap();
        assert_eq!(dir, "modules/shop/cart");
    }

    #[test]
    fn test_layout_rejects_shallow_or_foreign_paths() {
        let paths = PathsConfig::default();
        assert!(module_layout("modules/shop/query.graphqls", &paths).is_none());
        assert!(module_layout("graph/a/b/query.graphqls", &paths).is_none());
    }
}
