use std::collections::HashMap;

use tracing::debug;

use crate::jar::{
    naming::NameGenerator,
    types::{is_module_info, EntryKind, MappingTable},
};

/// Collects class names during pass 1 and hands out generated names.
///
/// The resulting table only depends on the set of distinct names observed:
/// seeing a class twice reuses the name assigned the first time.
pub struct MappingTableBuilder<'g> {
    generator: &'g mut NameGenerator,
    classes: HashMap<String, String>,
}

impl<'g> MappingTableBuilder<'g> {
    pub fn new(generator: &'g mut NameGenerator) -> Self {
        Self {
            generator,
            classes: HashMap::new(),
        }
    }

    /// Generated name for `class_name`, allocating one on first sight.
    pub fn assign(&mut self, class_name: &str) -> &str {
        if !self.classes.contains_key(class_name) {
            let generated = self.generator.next_name();
            debug!("Mapped {} -> {}", class_name, generated);
            self.classes.insert(class_name.to_owned(), generated);
        }
        &self.classes[class_name]
    }

    /// Feeds one archive entry. Returns the generated name when the entry is
    /// a mappable class.
    pub fn observe(&mut self, entry_name: &str, is_dir: bool) -> Option<&str> {
        let EntryKind::Class { class_name } = EntryKind::classify(entry_name, is_dir) else {
            return None;
        };
        if is_module_info(class_name) {
            return None;
        }
        Some(self.assign(class_name))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Freezes the table. Nothing can be added afterwards.
    pub fn finish(self) -> MappingTable {
        MappingTable::from_assigned(self.classes)
    }
}
