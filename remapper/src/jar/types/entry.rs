use crate::jar::metadata::DescriptorKind;

use super::names::class_name_of_entry;

/// One entry of the archive, fully read into memory.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
    pub is_dir: bool,
}

/// How the pass-2 dispatcher treats an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind<'a> {
    Directory,
    Class { class_name: &'a str },
    Descriptor(DescriptorKind),
    Opaque,
}

impl<'a> EntryKind<'a> {
    pub fn classify(name: &'a str, is_dir: bool) -> Self {
        if is_dir || name.ends_with('/') {
            return EntryKind::Directory;
        }
        if let Some(class_name) = class_name_of_entry(name) {
            return EntryKind::Class { class_name };
        }
        match DescriptorKind::detect(name) {
            Some(kind) => EntryKind::Descriptor(kind),
            None => EntryKind::Opaque,
        }
    }
}

impl ArchiveEntry {
    pub fn kind(&self) -> EntryKind<'_> {
        EntryKind::classify(&self.name, self.is_dir)
    }
}
