//! Fast hash collections for string-keyed lookup tables.

pub use rustc_hash::{FxHashMap, FxHashSet};
