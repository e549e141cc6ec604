//! Archive reading and the two-pass JAR transformation
//!
//! [`remap_jar`] drives both passes; [`reader`] holds the small helpers for
//! opening archives and reading entries.

pub mod reader;
pub mod writer;

pub use reader::{open_jar, output_path_for, read_entry};
pub use writer::remap_jar;
