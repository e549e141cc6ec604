use std::io::{Read, Seek};

use krakatau2::zip::ZipArchive;
use tracing::{debug, info, warn};

use crate::{
    jar::{
        core::ClassRewriter,
        naming::NameGenerator,
        types::{is_module_info, EntryKind, MappingTable},
    },
    types::{RemapEvent, Stage, StageProgress},
};

use super::builder::MappingTableBuilder;

/// Pass 1: walks every entry of the archive and maps each distinct class.
///
/// Class entries the rewriter cannot parse are reported and left out of the
/// table. The returned table is complete for the archive and frozen.
pub fn build_mapping_table<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    generator: &mut NameGenerator,
    rewriter: &impl ClassRewriter,
    mut report_progress: impl FnMut(RemapEvent),
) -> anyhow::Result<MappingTable> {
    info!("Building mapping table over {} entries", zip.len());
    report_progress(Stage::BuildingMappingTable.into());

    let mut builder = MappingTableBuilder::new(generator);
    let mut data = Vec::new();
    let total = zip.len();

    for idx in 0..total {
        let mut file = zip.by_index(idx)?;
        let name = file.name().to_owned();

        if let EntryKind::Class { class_name } = EntryKind::classify(&name, file.is_dir()) {
            if is_module_info(class_name) {
                debug!("Keeping module descriptor name: {}", name);
            } else {
                data.clear();
                file.read_to_end(&mut data)?;
                match rewriter.inspect(&data) {
                    Ok(()) => {
                        builder.assign(class_name);
                    }
                    Err(err) => warn!("Skipping malformed class {}: {}", name, err),
                }
            }
        }

        if idx % 100 == 0 {
            report_progress(RemapEvent {
                stage: Stage::BuildingMappingTable,
                progress: StageProgress::of(idx + 1, total),
            });
        }
    }

    let table = builder.finish();
    info!("Mapped {} classes", table.len());
    report_progress(RemapEvent {
        stage: Stage::BuildingMappingTable,
        progress: StageProgress::Done,
    });

    Ok(table)
}
