//! Class name obfuscation for JAR archives
//!
//! Every class of an archive is given a random name from the Greek alphabet,
//! and every reference to it is updated: inside class files (constant pool
//! level) and inside the descriptors plugin loaders and mod frameworks read
//! class names from. The functionality is organized into several sub-modules:
//!
//! - `naming`: random, never repeating name generation
//! - `analysis`: pass 1, building the mapping table from the archive
//! - `core`: class file parsing, renaming and reassembly
//! - `metadata`: descriptor remapping (plugin.yml, mixins, fabric.mod.json, manifest)
//! - `io`: archive reading and the two-pass transformation
//! - `types`: entry classification, class name helpers and the mapping table
//!
//! # Example Usage
//!
//! ```no_run
//! use remapper::jar::{io::remap_jar, KrakatauRewriter, NameGenerator};
//!
//! let mut generator = NameGenerator::new();
//! let summary = remap_jar("in.jar", "in.jar-out.jar", &mut generator, &KrakatauRewriter, |_| {})?;
//! println!("{} classes renamed", summary.classes_rewritten);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod analysis;
pub mod core;
pub mod io;
pub mod metadata;
pub mod naming;
pub mod types;

pub use analysis::{build_mapping_table, MappingTableBuilder};
pub use core::{reasm, ClassRewriter, KrakatauRewriter, ReasmError, RenameError};
pub use io::{output_path_for, remap_jar};
pub use metadata::{remap_metadata, DescriptorKind, MetadataError};
pub use naming::NameGenerator;
pub use types::{ArchiveEntry, EntryKind, MappingTable};
