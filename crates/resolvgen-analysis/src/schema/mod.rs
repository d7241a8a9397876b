//! Schema reading: normalization, action extraction and the response
//! registry, combined into a [`SchemaModel`].

pub mod annotation;
pub mod extractor;
pub mod model;
pub mod normalizer;
pub mod registry;

pub use annotation::TypeAnnotation;
pub use extractor::{extract_actions, ActionSource};
pub use model::{ModelDump, SchemaDocument, SchemaModel, SchemaModelBuilder};
pub use normalizer::{normalize, strip_documentation, type_block_interior};
pub use registry::ResponseRegistry;
