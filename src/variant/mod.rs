//! Variants and the flat-file store that lists them.

mod name;
mod storage;
mod types;

pub use name::display_name;
pub use storage::{parse_store, read_variants, render_store, write_variants, VariantError};
pub use types::Variant;
