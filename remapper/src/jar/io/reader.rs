use std::{
    ffi::OsString,
    fs::File,
    io::{Read, Seek},
    path::{Path, PathBuf},
};

use anyhow::Context;
use krakatau2::zip::ZipArchive;

use crate::jar::types::ArchiveEntry;

const OUTPUT_SUFFIX: &str = "-out.jar";

/// Opens a read handle over the archive. Each pass opens its own.
pub fn open_jar(path: impl AsRef<Path>) -> anyhow::Result<ZipArchive<File>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Opening {}", path.display()))?;
    let zip = ZipArchive::new(file).with_context(|| format!("Reading {}", path.display()))?;
    Ok(zip)
}

pub fn read_entry<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    idx: usize,
) -> anyhow::Result<ArchiveEntry> {
    let mut file = zip.by_index(idx)?;
    let mut data = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut data)?;

    Ok(ArchiveEntry {
        name: file.name().to_owned(),
        data,
        is_dir: file.is_dir(),
    })
}

/// `<input>-out.jar`, next to the input.
pub fn output_path_for(input: impl AsRef<Path>) -> PathBuf {
    let mut path = OsString::from(input.as_ref().as_os_str());
    path.push(OUTPUT_SUFFIX);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_appends_suffix() {
        assert_eq!(
            output_path_for("plugins/my.jar"),
            PathBuf::from("plugins/my.jar-out.jar")
        );
        assert_eq!(output_path_for("app"), PathBuf::from("app-out.jar"));
    }
}
