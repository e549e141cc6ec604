use std::{
    borrow::Cow,
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use krakatau2::file_output_util::Writer;
use tracing::{debug, info, warn};

use crate::{
    jar::{
        analysis::build_mapping_table,
        core::ClassRewriter,
        metadata::remap_metadata,
        naming::NameGenerator,
        types::{is_module_info, ArchiveEntry, EntryKind, MappingTable, CLASS_EXT},
    },
    types::{RemapEvent, RemapSummary, Stage, StageProgress},
};

use super::reader::{open_jar, read_entry};

/// Renames every class of `jar_in` and writes the result to `jar_out`.
///
/// Pass 1 builds the complete mapping table, pass 2 rewrites class entries
/// through `rewriter` and descriptor entries through the metadata remapper,
/// copying everything else. The archive is assembled in a temporary file
/// next to `jar_out` and only moved into place once complete.
pub fn remap_jar(
    jar_in: impl AsRef<Path>,
    jar_out: impl AsRef<Path>,
    generator: &mut NameGenerator,
    rewriter: &impl ClassRewriter,
    mut report_progress: impl FnMut(RemapEvent),
) -> anyhow::Result<RemapSummary> {
    let jar_in = jar_in.as_ref();
    let jar_out = jar_out.as_ref();
    info!("Class name obfuscation starting: {}", jar_in.display());

    let table = {
        let mut zip = open_jar(jar_in)?;
        build_mapping_table(&mut zip, generator, rewriter, &mut report_progress)?
    };

    let staging = staging_path(jar_out, &generator.next_token())?;
    let written = write_remapped(jar_in, &staging, &table, rewriter, &mut report_progress)
        .and_then(|summary| {
            fs::rename(&staging, jar_out)
                .with_context(|| format!("Moving output to {}", jar_out.display()))?;
            Ok(summary)
        });

    let summary = match written {
        Ok(summary) => summary,
        Err(err) => {
            if let Err(cleanup) = fs::remove_file(&staging) {
                debug!("No staging file to remove ({})", cleanup);
            }
            return Err(err);
        }
    };

    info!(
        "Class name obfuscation completed: {} classes mapped, {} rewritten, {} descriptors remapped, {} copied, {} skipped",
        summary.classes_mapped,
        summary.classes_rewritten,
        summary.descriptors_remapped,
        summary.copied,
        summary.skipped
    );
    Ok(summary)
}

// Keeps the extension, the writer picks the container format from it
fn staging_path(jar_out: &Path, token: &str) -> anyhow::Result<PathBuf> {
    let file_name = jar_out
        .file_name()
        .ok_or_else(|| anyhow!("Output path has no file name: {}", jar_out.display()))?;
    let mut staged = std::ffi::OsString::from(format!(".{}-", token));
    staged.push(file_name);
    Ok(jar_out.with_file_name(staged))
}

/// Pass 2. Reads the input again through its own handle; `table` is final.
fn write_remapped(
    jar_in: &Path,
    jar_out: &Path,
    table: &MappingTable,
    rewriter: &impl ClassRewriter,
    report_progress: &mut impl FnMut(RemapEvent),
) -> anyhow::Result<RemapSummary> {
    report_progress(Stage::RewritingEntries.into());

    let mut zip = open_jar(jar_in)?;
    let mut writer = Writer::new(jar_out)?;
    let mut written_names = HashSet::new();
    let mut summary = RemapSummary {
        classes_mapped: table.len(),
        ..Default::default()
    };

    let total = zip.len();
    for idx in 0..total {
        let entry = read_entry(&mut zip, idx)?;

        if let Some((name, data)) = remap_entry(&entry, table, rewriter, &mut summary) {
            if written_names.insert(name.to_string()) {
                writer.write(Some(name.as_ref()), data.as_ref())?;
            } else {
                warn!("Dropping duplicate entry {}", name);
                summary.skipped += 1;
            }
        }

        if idx % 100 == 0 {
            report_progress(RemapEvent {
                stage: Stage::RewritingEntries,
                progress: StageProgress::of(idx + 1, total),
            });
        }
    }
    drop(writer);

    report_progress(RemapEvent {
        stage: Stage::RewritingEntries,
        progress: StageProgress::Done,
    });
    Ok(summary)
}

/// Output name and content for one entry, `None` to leave it out.
fn remap_entry<'e>(
    entry: &'e ArchiveEntry,
    table: &MappingTable,
    rewriter: &impl ClassRewriter,
    summary: &mut RemapSummary,
) -> Option<(Cow<'e, str>, Cow<'e, [u8]>)> {
    let name = Cow::Borrowed(entry.name.as_str());

    match entry.kind() {
        EntryKind::Directory => None,
        EntryKind::Class { class_name } => {
            let Some(mapped) = table.get(class_name) else {
                return Some(unmapped_class(entry, class_name, table, rewriter, summary));
            };
            match rewriter.rewrite(&entry.data, table) {
                Ok(bytes) => {
                    debug!("Renamed {} -> {}{}", entry.name, mapped, CLASS_EXT);
                    summary.classes_rewritten += 1;
                    Some((Cow::Owned(format!("{}{}", mapped, CLASS_EXT)), Cow::Owned(bytes)))
                }
                Err(err) => {
                    warn!("Failed to rewrite class {}: {}", entry.name, err);
                    summary.skipped += 1;
                    None
                }
            }
        }
        EntryKind::Descriptor(_) | EntryKind::Opaque => {
            let data = remap_metadata(&entry.name, &entry.data, table);
            match data {
                Cow::Owned(_) => summary.descriptors_remapped += 1,
                Cow::Borrowed(_) => summary.copied += 1,
            }
            Some((name, data))
        }
    }
}

/// Module descriptors still get their references renamed; classes that
/// failed to parse in pass 1 are copied.
fn unmapped_class<'e>(
    entry: &'e ArchiveEntry,
    class_name: &str,
    table: &MappingTable,
    rewriter: &impl ClassRewriter,
    summary: &mut RemapSummary,
) -> (Cow<'e, str>, Cow<'e, [u8]>) {
    let name = Cow::Borrowed(entry.name.as_str());
    if is_module_info(class_name) {
        match rewriter.rewrite(&entry.data, table) {
            Ok(bytes) => {
                summary.classes_rewritten += 1;
                return (name, Cow::Owned(bytes));
            }
            Err(err) => warn!("Failed to rewrite module descriptor {}: {}", entry.name, err),
        }
    }
    summary.copied += 1;
    (name, Cow::Borrowed(&entry.data))
}
