//! The action model extracted from schema files.
//!
//! Built once by the analysis stage and read-only afterwards.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root operation type a schema file contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [Self::Query, Self::Mutation, Self::Subscription];

    /// Lower-case name, as used in file names (`service_query.go`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    /// Root type name in the combined schema (`type Query { }`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }

    /// Substring identifying schema files of this kind.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Query => "query.graphqls",
            Self::Mutation => "mutation.graphqls",
            Self::Subscription => "subscription.graphqls",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `<project>/<package>` pair a schema file belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleRef {
    pub project: String,
    pub package: String,
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.package)
    }
}

/// One argument of an action, derived from its textual type annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    /// Schema type name with all markers stripped (`[ID!]!` → `ID`).
    pub type_name: String,
    /// The element type carries a trailing `!`.
    pub required: bool,
    /// The annotation is wrapped in `[...]`.
    pub is_list: bool,
    /// A `!` follows the closing bracket (list-level requiredness).
    /// Always false when `is_list` is false.
    pub is_list_required: bool,
}

/// One schema-declared operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub args: Vec<Argument>,
    /// Response type name without the trailing `!`.
    pub response_type_name: String,
    pub kind: OperationKind,
    pub module: ModuleRef,
}

/// Resolved type of the `result` field of a response type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMeta {
    /// Result type name with markers stripped. Empty for the fallback value
    /// handed out when a response type was never registered.
    pub type_name: String,
    pub is_list: bool,
    pub is_list_required: bool,
    pub required: bool,
}

/// One discovered query or mutation schema file and its actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    pub kind: OperationKind,
    pub module: ModuleRef,
    /// Path of the schema file.
    pub path: PathBuf,
    /// Module directory relative to the project root, `/`-separated, with
    /// the schemas directory stripped (`modules/shop/cart`).
    pub module_dir: String,
    /// The normalized schema mentions the `Upload` scalar.
    pub has_upload_field: bool,
    pub actions: Vec<Action>,
}
