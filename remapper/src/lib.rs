pub mod jar;
pub mod types;

pub use jar::{remap_jar, ClassRewriter, KrakatauRewriter, MappingTable, NameGenerator};
pub use types::{RemapEvent, RemapSummary, Stage, StageProgress};
