//! # resolvgen-core
//!
//! Shared foundation for the resolvgen code generator:
//! error taxonomy, configuration, tracing setup, and the action model
//! passed between the analysis and codegen crates.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::ResolvgenConfig;
pub use errors::{ErrorCode, ResolvgenError};
