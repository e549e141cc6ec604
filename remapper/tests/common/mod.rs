#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use krakatau2::file_output_util::Writer;
use tempfile::TempDir;

use remapper::{
    jar::{
        core::RenameError,
        io::{open_jar, read_entry},
        ArchiveEntry,
    },
    ClassRewriter, MappingTable,
};

/// Stand-in for the bytecode library. A "class" is a whitespace separated
/// list of binary names; rewriting resolves each of them.
pub struct TextRewriter;

impl ClassRewriter for TextRewriter {
    fn inspect(&self, class_bytes: &[u8]) -> Result<(), RenameError> {
        std::str::from_utf8(class_bytes)
            .map(|_| ())
            .map_err(|err| RenameError::Parse(err.to_string()))
    }

    fn rewrite(&self, class_bytes: &[u8], table: &MappingTable) -> Result<Vec<u8>, RenameError> {
        let text =
            std::str::from_utf8(class_bytes).map_err(|err| RenameError::Parse(err.to_string()))?;
        let words = text
            .split_whitespace()
            .map(|word| table.resolve(word))
            .collect::<Vec<_>>();
        Ok(words.join(" ").into_bytes())
    }
}

pub fn write_jar(path: &Path, entries: &[(&str, &[u8])]) -> anyhow::Result<()> {
    let mut writer = Writer::new(path)?;
    for (name, data) in entries {
        writer.write(Some(*name), data)?;
    }
    Ok(())
}

pub fn read_jar(path: &Path) -> anyhow::Result<Vec<ArchiveEntry>> {
    let mut zip = open_jar(path)?;
    (0..zip.len()).map(|idx| read_entry(&mut zip, idx)).collect()
}

pub struct Fixture {
    pub dir: TempDir,
    pub jar_in: PathBuf,
    pub jar_out: PathBuf,
}

impl Fixture {
    pub fn new(entries: &[(&str, &[u8])]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let jar_in = dir.path().join("input.jar");
        let jar_out = remapper::jar::output_path_for(&jar_in);
        write_jar(&jar_in, entries).unwrap();
        Self {
            dir,
            jar_in,
            jar_out,
        }
    }

    pub fn output(&self) -> Vec<ArchiveEntry> {
        read_jar(&self.jar_out).unwrap()
    }
}

pub fn entry<'a>(entries: &'a [ArchiveEntry], name: &str) -> &'a ArchiveEntry {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .unwrap_or_else(|| panic!("no entry {name}"))
}

pub fn text(entry: &ArchiveEntry) -> &str {
    std::str::from_utf8(&entry.data).unwrap()
}

/// Minimal class file: a class with `super_name` as super class, the given
/// `(name, descriptor)` fields, and optionally a `static final String`
/// field holding `literal` as its constant value.
pub fn class_file(
    this_name: &str,
    super_name: &str,
    fields: &[(&str, &str)],
    literal: Option<&str>,
) -> Vec<u8> {
    let mut pool = ConstantPool::default();
    let this_class = pool.class(this_name);
    let super_class = pool.class(super_name);

    let mut field_table = Vec::new();
    for (name, descriptor) in fields {
        let name = pool.utf8(name);
        let descriptor = pool.utf8(descriptor);
        field_table.push((0x0002u16, name, descriptor, None));
    }
    if let Some(literal) = literal {
        let name = pool.utf8("LITERAL");
        let descriptor = pool.utf8("Ljava/lang/String;");
        let value = pool.string(literal);
        let attribute = pool.utf8("ConstantValue");
        field_table.push((0x0019, name, descriptor, Some((attribute, value))));
    }

    let mut out = vec![0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 52];
    out.extend((pool.count + 1).to_be_bytes());
    out.extend(&pool.bytes);
    out.extend(0x0021u16.to_be_bytes());
    out.extend(this_class.to_be_bytes());
    out.extend(super_class.to_be_bytes());
    out.extend(0u16.to_be_bytes());

    out.extend((field_table.len() as u16).to_be_bytes());
    for (access, name, descriptor, constant) in field_table {
        out.extend(access.to_be_bytes());
        out.extend(name.to_be_bytes());
        out.extend(descriptor.to_be_bytes());
        match constant {
            Some((attribute, value)) => {
                out.extend(1u16.to_be_bytes());
                out.extend(attribute.to_be_bytes());
                out.extend(2u32.to_be_bytes());
                out.extend(value.to_be_bytes());
            }
            None => out.extend(0u16.to_be_bytes()),
        }
    }

    // methods, attributes
    out.extend(0u16.to_be_bytes());
    out.extend(0u16.to_be_bytes());
    out
}

// Utf8 entries are shared the way javac shares them
#[derive(Default)]
struct ConstantPool {
    bytes: Vec<u8>,
    count: u16,
    utf8: HashMap<String, u16>,
}

impl ConstantPool {
    fn push(&mut self, tag: u8, payload: &[u8]) -> u16 {
        self.bytes.push(tag);
        self.bytes.extend(payload);
        self.count += 1;
        self.count
    }

    fn utf8(&mut self, text: &str) -> u16 {
        if let Some(&index) = self.utf8.get(text) {
            return index;
        }
        let mut payload = (text.len() as u16).to_be_bytes().to_vec();
        payload.extend(text.as_bytes());
        let index = self.push(1, &payload);
        self.utf8.insert(text.to_owned(), index);
        index
    }

    fn class(&mut self, name: &str) -> u16 {
        let utf = self.utf8(name);
        self.push(7, &utf.to_be_bytes())
    }

    fn string(&mut self, text: &str) -> u16 {
        let utf = self.utf8(text);
        self.push(8, &utf.to_be_bytes())
    }
}
