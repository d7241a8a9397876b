//! # resolvgen-codegen
//!
//! Rendering stage of the resolvgen generator.
//! Turns a [`SchemaModel`](resolvgen_analysis::SchemaModel) into the
//! combined schema, the gqlgen resolver file and one service file per
//! module, merging with hand-edited service code already on disk.
//! Everything is staged in an [`ArtifactSet`] and committed in one step.

pub mod artifacts;
pub mod assembler;
pub mod context;
pub mod go_source;
pub mod pipeline;
pub mod resolver;
pub mod service;

pub use artifacts::{Artifact, ArtifactSet, CommitStats};
pub use context::EmitContext;
pub use pipeline::{GenerationReport, Generator, Stage};
