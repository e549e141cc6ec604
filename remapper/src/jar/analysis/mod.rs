//! Pass 1: discovery of the archive's classes
//!
//! [`MappingTableBuilder`] assigns generated names to class names,
//! [`build_mapping_table`] feeds it every class entry of an archive.

pub mod builder;
pub mod scanner;

pub use builder::MappingTableBuilder;
pub use scanner::build_mapping_table;
