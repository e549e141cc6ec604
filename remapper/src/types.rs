#[derive(Debug)]
pub struct RemapEvent {
    pub stage: Stage,
    pub progress: StageProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BuildingMappingTable,
    RewritingEntries,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::BuildingMappingTable => "Building Mapping Table",
            Stage::RewritingEntries => "Rewriting Entries",
        }
    }
}

impl From<Stage> for RemapEvent {
    fn from(value: Stage) -> Self {
        RemapEvent {
            stage: value,
            progress: StageProgress::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageProgress {
    Unknown,
    Percentage(f32),
    Done,
}

impl StageProgress {
    pub(crate) fn of(done: usize, total: usize) -> Self {
        if total == 0 {
            return StageProgress::Percentage(1.0);
        }
        StageProgress::Percentage(done as f32 / total as f32)
    }
}

/// What a finished run did, entry by entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RemapSummary {
    /// Size of the mapping table
    pub classes_mapped: usize,
    /// Class entries written through the bytecode rewriter
    pub classes_rewritten: usize,
    /// Descriptor entries whose content changed
    pub descriptors_remapped: usize,
    /// Entries written byte-for-byte
    pub copied: usize,
    /// Entries left out of the output (failed rewrites, duplicate names)
    pub skipped: usize,
}
