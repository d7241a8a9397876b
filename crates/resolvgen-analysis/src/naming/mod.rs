//! Naming and type-mapping rules shared by every emitter.
//!
//! Pure functions, no I/O. Generated identifiers follow one acronym
//! convention project-wide: `id` and `api` words are upper-cased inside
//! multi-word identifiers.

pub mod case;
pub mod types;

pub use case::{split_and_recase, split_words, upper_first};
pub use types::{
    go_arg_type, map_scalar, response_pointer_type, response_struct_type, wrap_list,
    wrap_optional, MODEL_PACKAGE,
};
