//! Extension traits for TOML tables and JSON objects.

mod json_object;
mod toml_table;

pub use json_object::JsonObjectExt;
pub use toml_table::TomlTableExt;
