use std::collections::{HashMap, HashSet};

use super::names::{binary_to_dotted, dotted_to_binary};

/// Frozen old-name -> new-name table for one run.
///
/// Keys and values are binary class names. The table is keyed by the full
/// original name, never by a digest of it, so two distinct classes cannot
/// collapse into one entry. It can only be populated through
/// [`MappingTableBuilder`](crate::jar::analysis::MappingTableBuilder);
/// once built it is read-only.
#[derive(Debug, Default, Clone)]
pub struct MappingTable {
    classes: HashMap<String, String>,
    generated: HashSet<String>,
}

impl MappingTable {
    pub(crate) fn from_assigned(classes: HashMap<String, String>) -> Self {
        let generated = classes.values().cloned().collect();
        Self { classes, generated }
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.classes.get(original).map(String::as_str)
    }

    /// Mapped name, or `original` itself for classes outside the archive.
    pub fn resolve<'a>(&'a self, original: &'a str) -> &'a str {
        self.get(original).unwrap_or(original)
    }

    /// Same as [`resolve`](Self::resolve) for a dotted reference, as found
    /// in textual descriptors. The result is dotted as well.
    pub fn resolve_dotted(&self, dotted: &str) -> String {
        let binary = dotted_to_binary(dotted);
        binary_to_dotted(self.resolve(&binary))
    }

    pub fn contains_generated(&self, name: &str) -> bool {
        self.generated.contains(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Pairs sorted by original name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut pairs = self
            .classes
            .iter()
            .map(|(original, generated)| (original.as_str(), generated.as_str()))
            .collect::<Vec<_>>();
        pairs.sort_unstable();
        pairs.into_iter()
    }
}
