//! # resolvgen-analysis
//!
//! Analysis stage of the resolvgen generator.
//! Discovers schema files, normalizes them, extracts the action model and
//! the response registry, and provides the naming/type-mapping rules the
//! emitters share.

pub mod naming;
pub mod scanner;
pub mod schema;

pub use schema::{SchemaModel, SchemaModelBuilder};
