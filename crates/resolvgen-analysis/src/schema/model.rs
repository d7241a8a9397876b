//! In-memory schema model shared by every emitter.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use resolvgen_core::errors::SchemaError;
use resolvgen_core::types::{Action, OperationKind, ResultMeta, SchemaFile};
use resolvgen_core::ResolvgenConfig;

use crate::scanner::{module_layout, DiscoveredFile, Discovery, RESPONSE_FILE_SUFFIX};

use super::extractor::{extract_actions, ActionSource};
use super::normalizer::{normalize_interior, type_block_interior};
use super::registry::ResponseRegistry;

/// Raw interior of a schema file's type block, kept for assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDocument {
    pub kind: OperationKind,
    pub path: PathBuf,
    pub interior: String,
}

/// Everything extracted from one project. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct SchemaModel {
    /// Query files, then mutation files, each in discovery order.
    pub files: Vec<SchemaFile>,
    /// Query, mutation and subscription interiors, in discovery order.
    pub documents: Vec<SchemaDocument>,
    pub registry: ResponseRegistry,
}

/// Serializable view of a model.
#[derive(Debug, Serialize)]
pub struct ModelDump<'a> {
    pub files: &'a [SchemaFile],
    pub responses: BTreeMap<&'a str, &'a ResultMeta>,
}

impl SchemaModel {
    /// All actions keyed by name. A later definition replaces an earlier one.
    pub fn action_table(&self) -> BTreeMap<&str, &Action> {
        let mut table = BTreeMap::new();
        for action in self.files.iter().flat_map(|f| &f.actions) {
            if table.insert(action.name.as_str(), action).is_some() {
                tracing::debug!(action = %action.name, module = %action.module, "action redefined; last definition wins");
            }
        }
        table
    }

    pub fn documents_of(&self, kind: OperationKind) -> impl Iterator<Item = &SchemaDocument> {
        self.documents.iter().filter(move |d| d.kind == kind)
    }

    /// Any query or mutation file mentions the `Upload` scalar.
    pub fn has_upload_field(&self) -> bool {
        self.files.iter().any(|f| f.has_upload_field)
    }

    pub fn action_count(&self) -> usize {
        self.files.iter().map(|f| f.actions.len()).sum()
    }

    pub fn dump(&self) -> ModelDump<'_> {
        ModelDump {
            files: &self.files,
            responses: self.registry.sorted(),
        }
    }
}

/// Reads discovered schema files and builds a [`SchemaModel`].
pub struct SchemaModelBuilder<'a> {
    config: &'a ResolvgenConfig,
}

impl<'a> SchemaModelBuilder<'a> {
    pub fn new(config: &'a ResolvgenConfig) -> Self {
        Self { config }
    }

    /// Build the model. The response registry is complete before any
    /// action is extracted; the first contract violation aborts.
    pub fn build(&self, discovery: &Discovery) -> Result<SchemaModel, SchemaError> {
        let mut model = SchemaModel::default();

        for file in discovery.with_suffix(RESPONSE_FILE_SUFFIX) {
            let text = read_schema(&file.path)?;
            model.registry.register_file(&file.path, &text)?;
        }

        for kind in OperationKind::ALL {
            for file in discovery.with_suffix(kind.file_suffix()) {
                let text = read_schema(&file.path)?;
                let interior = type_block_interior(&text).ok_or_else(|| {
                    SchemaError::MissingTypeBlock {
                        path: file.path.clone(),
                    }
                })?;

                if kind != OperationKind::Subscription {
                    model.files.push(self.schema_file(file, kind, interior)?);
                }
                model.documents.push(SchemaDocument {
                    kind,
                    path: file.path.clone(),
                    interior: interior.to_string(),
                });
            }
        }

        tracing::info!(
            files = model.files.len(),
            actions = model.action_count(),
            responses = model.registry.len(),
            "schema model built"
        );
        Ok(model)
    }

    fn schema_file(
        &self,
        file: &DiscoveredFile,
        kind: OperationKind,
        interior: &str,
    ) -> Result<SchemaFile, SchemaError> {
        let (module, module_dir) = module_layout(&file.relative, &self.config.paths).ok_or_else(|| {
            SchemaError::UnexpectedLayout {
                path: file.path.clone(),
            }
        })?;

        let normalized = normalize_interior(interior);
        let actions = extract_actions(
            &normalized,
            ActionSource {
                path: &file.path,
                kind,
                module: &module,
            },
        )?;

        Ok(SchemaFile {
            kind,
            has_upload_field: normalized.contains("Upload"),
            module,
            path: file.path.clone(),
            module_dir,
            actions,
        })
    }
}

fn read_schema(path: &Path) -> Result<String, SchemaError> {
    std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::walk_directory;
    use resolvgen_core::config::ScanConfig;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn build(root: &Path) -> Result<SchemaModel, SchemaError> {
        let discovery = walk_directory(root, &ScanConfig::default()).unwrap();
        SchemaModelBuilder::new(&ResolvgenConfig::default()).build(&discovery)
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "modules/shop/user/schemas/user_query.graphqls",
            "type Query {\n  getUser(id: ID!): GetUserResponse!\n}\n",
        );
        write(
            dir.path(),
            "modules/shop/user/schemas/user_mutation.graphqls",
            "type Mutation {\n  uploadAvatar(file: Upload!): GetUserResponse!\n}\n",
        );
        write(
            dir.path(),
            "modules/shop/user/schemas/user_response.graphqls",
            "type GetUserResponse {\n  result: GetUserResult\n  success: Boolean!\n  elapsedTime: String!\n}\n",
        );
        write(
            dir.path(),
            "modules/shop/user/schemas/user_subscription.graphqls",
            "type Subscription {\n  userChanged: GetUserResponse!\n}\n",
        );
        dir
    }

    #[test]
    fn test_build_model() {
        let dir = project();
        let model = build(dir.path()).unwrap();

        assert_eq!(model.files.len(), 2);
        assert_eq!(model.files[0].kind, OperationKind::Query);
        assert_eq!(model.files[0].module_dir, "modules/shop/user");
        assert!(!model.files[0].has_upload_field);
        assert!(model.files[1].has_upload_field);
        assert!(model.has_upload_field());

        assert_eq!(model.documents.len(), 3);
        assert_eq!(model.documents_of(OperationKind::Subscription).count(), 1);
        assert_eq!(model.registry.get("GetUserResponse").unwrap().type_name, "GetUserResult");

        let table = model.action_table();
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec!["getUser", "uploadAvatar"]);
    }

    #[test]
    fn test_missing_type_block_is_fatal() {
        let dir = project();
        write(dir.path(), "modules/shop/cart/schemas/cart_query.graphqls", "# nothing here\n");
        let err = build(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingTypeBlock { ref path } if path.ends_with("cart_query.graphqls")));
    }

    #[test]
    fn test_schema_outside_modules_is_rejected() {
        let dir = project();
        write(dir.path(), "graph/extra_query.graphqls", "type Query {\n  a: AResponse!\n}\n");
        let err = build(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedLayout { .. }));
    }

    #[test]
    fn test_invalid_registry_aborts_before_extraction() {
        let dir = project();
        write(
            dir.path(),
            "modules/shop/user/schemas/user_response.graphqls",
            "type GetUserResponse {\n  result: GetUserResult\n  success: Boolean!\n}\n",
        );
        let err = build(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingEnvelopeField { field: "elapsedTime", .. }));
    }

    #[test]
    fn test_duplicate_action_last_wins() {
        let dir = project();
        write(
            dir.path(),
            "modules/shop/zeta/schemas/zeta_query.graphqls",
            "type Query {\n  getUser(id: ID!, verbose: Boolean): GetUserResponse!\n}\n",
        );
        let model = build(dir.path()).unwrap();
        let table = model.action_table();
        assert_eq!(table["getUser"].module.package, "zeta");
        assert_eq!(table["getUser"].args.len(), 2);
    }
}
