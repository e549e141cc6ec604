//! Data model shared by both passes
//!
//! Archive entries and their classification, binary/dotted class-name
//! helpers and the frozen [`MappingTable`].

pub mod entry;
pub mod names;
pub mod table;

pub use entry::{ArchiveEntry, EntryKind};
pub use names::{
    binary_to_dotted, class_name_of_entry, dotted_to_binary, is_module_info, CLASS_EXT,
};
pub use table::MappingTable;
