//! Schema file discovery.

pub mod layout;
pub mod types;
pub mod walker;

pub use layout::module_layout;
pub use types::{DiscoveredFile, Discovery, RESPONSE_FILE_SUFFIX};
pub use walker::walk_directory;
