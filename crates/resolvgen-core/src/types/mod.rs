//! Shared types used across resolvgen crates.

pub mod collections;
pub mod model;

pub use model::{Action, Argument, ModuleRef, OperationKind, ResultMeta, SchemaFile};
