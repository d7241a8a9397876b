//! Response registry: response type name → shape of its `result` field.
//!
//! Every response type must follow the `{ result, success, elapsedTime }`
//! envelope convention; violations are fatal.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use resolvgen_core::errors::SchemaError;
use resolvgen_core::types::collections::FxHashMap;
use resolvgen_core::types::ResultMeta;

use super::annotation::TypeAnnotation;
use super::normalizer::strip_documentation;

static TYPE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btype\s+(\w+)[^{\n]*\{([^}]*)\}").expect("valid type block regex")
});
static RESULT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bresult\s*:\s*([^\n#,]+)").expect("valid result regex"));
static SUCCESS_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsuccess\s*:").expect("valid success regex"));
static ELAPSED_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\belapsedTime\s*:").expect("valid elapsedTime regex"));

const SCALAR_RESULTS: [&str; 3] = ["Int", "Boolean", "String"];

/// Registered response types, keyed by name.
#[derive(Debug, Default, Clone)]
pub struct ResponseRegistry {
    entries: FxHashMap<String, ResultMeta>,
}

impl ResponseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every envelope type declared in one response file.
    ///
    /// Type blocks without a `result` field are skipped. Returns the number
    /// of registered entries.
    pub fn register_file(&mut self, path: &Path, text: &str) -> Result<usize, SchemaError> {
        let cleaned = strip_documentation(text);
        let mut registered = 0;

        for block in TYPE_BLOCK.captures_iter(&cleaned) {
            let response = &block[1];
            let body = &block[2];
            let Some(result) = RESULT_FIELD.captures(body) else {
                continue;
            };

            let meta = TypeAnnotation::parse(&result[1]).into_result_meta();
            validate_envelope(response, body, &meta, path)?;

            if self.entries.insert(response.to_string(), meta).is_some() {
                tracing::debug!(response, path = %path.display(), "response redefined; last definition wins");
            }
            registered += 1;
        }

        tracing::debug!(path = %path.display(), registered, "registered response types");
        Ok(registered)
    }

    pub fn get(&self, response: &str) -> Option<&ResultMeta> {
        self.entries.get(response)
    }

    /// Result shape of a response, or an empty default when the response
    /// type was never registered.
    pub fn result_for(&self, response: &str) -> ResultMeta {
        match self.entries.get(response) {
            Some(meta) => meta.clone(),
            None => {
                tracing::warn!(response, "response type not registered; emitting untyped result");
                ResultMeta::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by response name.
    pub fn sorted(&self) -> BTreeMap<&str, &ResultMeta> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}

fn validate_envelope(
    response: &str,
    body: &str,
    meta: &ResultMeta,
    path: &Path,
) -> Result<(), SchemaError> {
    let name_ok =
        SCALAR_RESULTS.contains(&meta.type_name.as_str()) || meta.type_name.contains("Result");
    if !name_ok {
        return Err(SchemaError::InvalidResultName {
            response: response.to_string(),
            result: meta.type_name.clone(),
            path: path.to_path_buf(),
        });
    }

    for (field, pattern) in [("success", &*SUCCESS_FIELD), ("elapsedTime", &*ELAPSED_FIELD)] {
        if !pattern.is_match(body) {
            return Err(SchemaError::MissingEnvelopeField {
                response: response.to_string(),
                field,
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}
