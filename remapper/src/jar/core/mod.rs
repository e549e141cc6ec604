//! Bytecode side of the remapping
//!
//! Parsing, renaming and reassembly of class files, behind the
//! [`ClassRewriter`] seam. Descriptors and generic signatures are renamed
//! by [`remap_descriptor`].

pub mod assembly;
pub mod rename;
pub mod signature;

pub use assembly::{reasm, ReasmError};
pub use rename::{remap_class_ref, ClassRewriter, KrakatauRewriter, RenameError, RenamePlan};
pub use signature::remap_descriptor;
